//! Payment cards and the networks that issue their tiers.
//!
//! Cards are immutable reference data loaded once per catalogue. The engine
//! only reads them.

use thiserror::Error;

/// Card network operating the payment rails.
///
/// The network, together with the card grade, selects the network-tier
/// benefits a card carries regardless of its issuing bank.
///
/// # Examples
/// ```
/// use perkmatch_core::Network;
///
/// assert_eq!(Network::Visa.as_str(), "VISA");
/// assert_eq!("mastercard".parse::<Network>(), Ok(Network::Mastercard));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Network {
    /// Visa.
    Visa,
    /// Mastercard.
    Mastercard,
    /// American Express.
    Amex,
    /// JCB.
    Jcb,
    /// UnionPay.
    UnionPay,
    /// Domestic-only brand without international acceptance.
    Local,
}

impl Network {
    /// Return the canonical label used in catalogue data.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "VISA",
            Self::Mastercard => "Mastercard",
            Self::Amex => "AMEX",
            Self::Jcb => "JCB",
            Self::UnionPay => "UnionPay",
            Self::Local => "Local",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a network label is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown card network '{label}'")]
pub struct NetworkParseError {
    /// Label that failed to parse.
    pub label: String,
}

impl std::str::FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visa" => Ok(Self::Visa),
            "mastercard" | "master" | "mc" => Ok(Self::Mastercard),
            "amex" | "american express" => Ok(Self::Amex),
            "jcb" => Ok(Self::Jcb),
            "unionpay" | "union pay" | "cup" => Ok(Self::UnionPay),
            "local" | "domestic" => Ok(Self::Local),
            _ => Err(NetworkParseError {
                label: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for Network {
    type Error = NetworkParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Network> for String {
    fn from(network: Network) -> Self {
        network.as_str().to_owned()
    }
}

/// A payment card a user may hold.
///
/// # Examples
/// ```
/// use perkmatch_core::{Card, Network};
///
/// let card = Card::new("c1", "Hana", "Travlog", Network::Visa, "Platinum");
/// assert_eq!(card.short_name, "Travlog");
/// assert!(!card.discontinued);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Card {
    /// Catalogue identifier.
    pub id: String,
    /// Issuing bank or card company.
    pub issuer: String,
    /// Full product name.
    pub name: String,
    /// Abbreviated name for compact displays.
    pub short_name: String,
    /// Payment network.
    pub network: Network,
    /// Network tier label such as `Infinite` or `Platinum`.
    pub grade: String,
    /// Display colour as a CSS hex string.
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: String,
    /// Yearly fee in won, when published.
    #[cfg_attr(feature = "serde", serde(default))]
    pub annual_fee: Option<u32>,
    /// Whether the product is no longer issued.
    #[cfg_attr(feature = "serde", serde(default))]
    pub discontinued: bool,
}

impl Card {
    /// Construct a card with the short name defaulting to `name`.
    pub fn new(
        id: impl Into<String>,
        issuer: impl Into<String>,
        name: impl Into<String>,
        network: Network,
        grade: impl Into<String>,
    ) -> Self {
        let full_name = name.into();
        Self {
            id: id.into(),
            issuer: issuer.into(),
            short_name: full_name.clone(),
            name: full_name,
            network,
            grade: grade.into(),
            color: String::new(),
            annual_fee: None,
            discontinued: false,
        }
    }

    /// The `(network, grade)` pair selecting network-tier benefits.
    #[must_use]
    pub fn tier(&self) -> (Network, &str) {
        (self.network, self.grade.as_str())
    }
}
