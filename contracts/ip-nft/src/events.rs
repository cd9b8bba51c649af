use soroban_sdk::{contractevent, Address, String};

/// Event emitted when an IP-NFT is minted
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Minted {
    #[topic]
    pub creator: Address,
    pub token_id: u32,
    pub uri: String,
}

/// Event emitted when an IP-NFT changes hands
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub token_id: u32,
}
