use thiserror::Error;

use crate::types::{AccountId, ItemRef};

pub type Result<T> = std::result::Result<T, SwapError>;

/// Failures reported by an ownership registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown item {0}")]
    UnknownItem(ItemRef),

    #[error("account {account} does not hold item {item}")]
    NotHolder { item: ItemRef, account: AccountId },

    #[error("account {mover} is not authorized to move item {item}")]
    NotAuthorized { item: ItemRef, mover: AccountId },

    #[error("the zero account cannot hold items")]
    ZeroAccount,

    #[error("item {0} already minted")]
    AlreadyMinted(ItemRef),
}

/// Rejections raised by the swap ledger.
///
/// Every variant is terminal for the call that raised it; the ledger state is
/// left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("account {caller} is not the owner of {item}")]
    NotOwner { item: ItemRef, caller: AccountId },

    #[error("ledger is not approved to move {0}")]
    NotApproved(ItemRef),

    #[error("a swap request already exists for {0}")]
    RequestAlreadyExists(ItemRef),

    #[error("no swap request exists for {0}")]
    RequestNotExists(ItemRef),

    #[error("an offer already exists for {0}")]
    OfferAlreadyExists(ItemRef),

    #[error("no offer exists for {0}")]
    OfferNotExists(ItemRef),

    #[error("item {0} cannot be offered against its own request")]
    SameItem(ItemRef),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Failures raised by the sticker issuance collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssuanceError {
    #[error("not enough funds: paid {paid}, mint fee is {required}")]
    NotEnoughFunds { paid: u64, required: u64 },

    #[error("account {0} is not the collection owner")]
    NotCollectionOwner(AccountId),

    #[error("unknown token {0}")]
    UnknownToken(u64),

    #[error("collection needs at least one token URI")]
    EmptyUriSet,

    #[error("invalid fee: {0}")]
    InvalidFee(String),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Configuration loading and validation failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
