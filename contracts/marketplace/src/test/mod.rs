pub mod listing_test;
pub mod settlement_test;

use ip_nft::{IpMetadata, IpNft, IpNftClient};
use soroban_sdk::{
    testutils::{Address as _, Events as _, Ledger},
    token, Address, BytesN, Env, Event, String,
};

use crate::{Marketplace, MarketplaceClient};

pub const FEE_BPS: u32 = 250;
pub const START_TIME: u64 = 1_700_000_000;
pub const INITIAL_BALANCE: i128 = 10_000_000;
pub const DAY: u64 = 86_400;

pub struct TestContext {
    pub env: Env,
    pub client: MarketplaceClient<'static>,
    pub admin: Address,
    pub seller: Address,
    pub buyer: Address,
    pub bidder: Address,
    pub payment: token::TokenClient<'static>,
    pub nft: IpNftClient<'static>,
}

pub fn setup_test() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = START_TIME);

    let admin = Address::generate(&env);
    let seller = Address::generate(&env);
    let buyer = Address::generate(&env);
    let bidder = Address::generate(&env);

    let token_admin = Address::generate(&env);
    let payment_contract = env.register_stellar_asset_contract_v2(token_admin);
    let payment_address = payment_contract.address();
    let payment = token::TokenClient::new(&env, &payment_address);
    let payment_admin = token::StellarAssetClient::new(&env, &payment_address);
    payment_admin.mint(&buyer, &INITIAL_BALANCE);
    payment_admin.mint(&bidder, &INITIAL_BALANCE);

    let nft = IpNftClient::new(&env, &env.register(IpNft, ()));
    nft.initialize(
        &admin,
        &String::from_str(&env, "IP Assets"),
        &String::from_str(&env, "IPNFT"),
    );

    let contract_id = env.register(Marketplace, ());
    let client = MarketplaceClient::new(&env, &contract_id);
    client.initialize(&admin, &payment_address, &FEE_BPS);

    TestContext {
        env,
        client,
        admin,
        seller,
        buyer,
        bidder,
        payment,
        nft,
    }
}

/// Mint a fresh IP-NFT to `owner` and return its id.
pub fn mint_ip(ctx: &TestContext, owner: &Address) -> u32 {
    let env = &ctx.env;
    ctx.nft.mint(
        owner,
        &IpMetadata {
            title: String::from_str(env, "Gene therapy vector"),
            description: String::from_str(env, "Exclusive licence to an AAV capsid"),
            ip_type: String::from_str(env, "patent"),
            uri: String::from_str(env, "ipfs://bafkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku"),
            content_hash: BytesN::from_array(env, &[42u8; 32]),
        },
    )
}

pub fn advance_ledger(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

pub fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

/// Whether the last invocation published `event` from the marketplace.
pub fn published(ctx: &TestContext, event: &impl Event) -> bool {
    ctx.env.events().all().contains((
        ctx.client.address.clone(),
        event.topics(&ctx.env),
        event.data(&ctx.env),
    ))
}
