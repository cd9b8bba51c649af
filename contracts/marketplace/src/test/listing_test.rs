use ipnft_custody::TokenStandard;
use soroban_sdk::{
    testutils::{storage::Persistent as _, Address as _, Ledger},
    token, Address,
};

use crate::test::{mint_ip, setup_test, DAY, FEE_BPS, INITIAL_BALANCE};
use crate::types::{StorageKey, DAY_IN_LEDGERS, PERSISTENT_TTL_AMOUNT};
use crate::{Error, SaleRef};

const PRICE: i128 = 10_000;

#[test]
fn test_initialize() {
    let ctx = setup_test();

    let config = ctx.client.get_config();
    assert_eq!(config.admin, ctx.admin);
    assert_eq!(config.payment_token, ctx.payment.address);
    assert_eq!(config.fee_bps, FEE_BPS);
    assert!(!config.is_paused);

    let result = ctx
        .client
        .try_initialize(&ctx.admin, &ctx.payment.address, &FEE_BPS);
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_list_item_takes_custody() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);

    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );

    assert_eq!(listing_id, 1);
    let listing = ctx.client.get_listing(&listing_id);
    assert_eq!(listing.seller, ctx.seller);
    assert_eq!(listing.price, PRICE);
    assert!(listing.active);

    assert_eq!(ctx.nft.owner_of(&token_id), ctx.client.address);
    assert_eq!(
        ctx.client.get_sale_for_token(&ctx.nft.address, &token_id),
        Some(SaleRef::Listing(listing_id))
    );
    assert_eq!(ctx.client.get_stats().total_listings, 1);
}

#[test]
fn test_list_item_requires_ownership() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);

    let result = ctx.client.try_list_item(
        &ctx.buyer,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );
    assert_eq!(result, Err(Ok(Error::NotTokenOwner)));

    // never minted
    let result = ctx.client.try_list_item(
        &ctx.seller,
        &ctx.nft.address,
        &99,
        &TokenStandard::NonFungible,
        &PRICE,
    );
    assert_eq!(result, Err(Ok(Error::NotTokenOwner)));
}

#[test]
fn test_list_item_invalid_price() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);

    for price in [0i128, -5] {
        let result = ctx.client.try_list_item(
            &ctx.seller,
            &ctx.nft.address,
            &token_id,
            &TokenStandard::NonFungible,
            &price,
        );
        assert_eq!(result, Err(Ok(Error::InvalidPrice)));
    }
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.seller);
}

#[test]
fn test_token_in_at_most_one_sale() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);

    ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );

    let relist = ctx.client.try_list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );
    assert_eq!(relist, Err(Ok(Error::AlreadyOnSale)));

    let auction = ctx.client.try_create_auction(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
        &DAY,
    );
    assert_eq!(auction, Err(Ok(Error::AlreadyOnSale)));
}

#[test]
fn test_buy_item_exact_price() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);
    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );

    ctx.client.buy_item(&ctx.buyer, &listing_id, &PRICE);

    let fee = PRICE * FEE_BPS as i128 / 10_000;
    assert!(!ctx.client.get_listing(&listing_id).active);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.buyer);
    assert_eq!(ctx.payment.balance(&ctx.seller), PRICE - fee);
    assert_eq!(ctx.payment.balance(&ctx.admin), fee);
    assert_eq!(ctx.payment.balance(&ctx.buyer), INITIAL_BALANCE - PRICE);
    assert_eq!(ctx.payment.balance(&ctx.client.address), 0);
    assert_eq!(ctx.client.get_sale_for_token(&ctx.nft.address, &token_id), None);

    let stats = ctx.client.get_stats();
    assert_eq!(stats.total_sales, 1);
    assert_eq!(stats.total_volume, PRICE);
    assert_eq!(stats.total_fees, fee);
}

#[test]
fn test_buy_item_refunds_overpayment() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);
    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );

    ctx.client.buy_item(&ctx.buyer, &listing_id, &(PRICE + 3_000));

    assert_eq!(ctx.payment.balance(&ctx.buyer), INITIAL_BALANCE - PRICE);
    assert_eq!(ctx.payment.balance(&ctx.client.address), 0);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.buyer);
}

#[test]
fn test_buy_item_insufficient_payment() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);
    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );

    let result = ctx.client.try_buy_item(&ctx.buyer, &listing_id, &(PRICE - 1));
    assert_eq!(result, Err(Ok(Error::InsufficientPayment)));

    assert!(ctx.client.get_listing(&listing_id).active);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.client.address);
    assert_eq!(ctx.payment.balance(&ctx.buyer), INITIAL_BALANCE);
    assert_eq!(ctx.payment.balance(&ctx.seller), 0);
}

#[test]
fn test_buy_own_listing_fails() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);
    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );

    let result = ctx.client.try_buy_item(&ctx.seller, &listing_id, &PRICE);
    assert_eq!(result, Err(Ok(Error::CannotBuyOwnListing)));
}

#[test]
fn test_buy_sold_listing_fails() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);
    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );
    ctx.client.buy_item(&ctx.buyer, &listing_id, &PRICE);

    let result = ctx.client.try_buy_item(&ctx.bidder, &listing_id, &PRICE);
    assert_eq!(result, Err(Ok(Error::ListingNotActive)));

    let result = ctx.client.try_buy_item(&ctx.bidder, &77, &PRICE);
    assert_eq!(result, Err(Ok(Error::ListingNotFound)));
}

#[test]
fn test_cancel_listing_returns_token() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);
    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );

    let result = ctx.client.try_cancel_listing(&ctx.buyer, &listing_id);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));

    ctx.client.cancel_listing(&ctx.seller, &listing_id);

    assert!(!ctx.client.get_listing(&listing_id).active);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.seller);
    assert_eq!(ctx.client.get_sale_for_token(&ctx.nft.address, &token_id), None);

    let result = ctx.client.try_cancel_listing(&ctx.seller, &listing_id);
    assert_eq!(result, Err(Ok(Error::ListingNotActive)));

    // the token can go back on sale once the listing is closed
    let relisted = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &(PRICE * 2),
    );
    assert_eq!(relisted, 2);
}

#[test]
fn test_set_fee_rate() {
    let ctx = setup_test();

    ctx.client.set_fee_rate(&ctx.admin, &1_000);
    assert_eq!(ctx.client.get_fee_rate(), 1_000);
    assert_eq!(ctx.client.calculate_fee(&50_000), 5_000);

    let result = ctx.client.try_set_fee_rate(&ctx.admin, &1_001);
    assert_eq!(result, Err(Ok(Error::FeeTooHigh)));

    let result = ctx.client.try_set_fee_rate(&ctx.seller, &100);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
    assert_eq!(ctx.client.get_fee_rate(), 1_000);
}

#[test]
fn test_paused_marketplace_blocks_new_sales() {
    let ctx = setup_test();
    let token_id = mint_ip(&ctx, &ctx.seller);
    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );

    ctx.client.set_paused(&ctx.admin, &true);

    let result = ctx.client.try_buy_item(&ctx.buyer, &listing_id, &PRICE);
    assert_eq!(result, Err(Ok(Error::MarketplacePaused)));

    let other = mint_ip(&ctx, &ctx.seller);
    let result = ctx.client.try_list_item(
        &ctx.seller,
        &ctx.nft.address,
        &other,
        &TokenStandard::NonFungible,
        &PRICE,
    );
    assert_eq!(result, Err(Ok(Error::MarketplacePaused)));

    // sellers can still take their tokens back
    ctx.client.cancel_listing(&ctx.seller, &listing_id);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.seller);

    ctx.client.set_paused(&ctx.admin, &false);
    assert!(!ctx.client.get_config().is_paused);
}

#[test]
fn test_stellar_asset_listing() {
    let ctx = setup_test();
    let env = &ctx.env;

    let issuer = Address::generate(env);
    let asset = env.register_stellar_asset_contract_v2(issuer);
    token::StellarAssetClient::new(env, &asset.address()).mint(&ctx.seller, &1);
    let asset_client = token::TokenClient::new(env, &asset.address());

    let result = ctx.client.try_list_item(
        &ctx.seller,
        &asset.address(),
        &1,
        &TokenStandard::StellarAsset,
        &PRICE,
    );
    assert_eq!(result, Err(Ok(Error::InvalidTokenId)));

    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &asset.address(),
        &0,
        &TokenStandard::StellarAsset,
        &PRICE,
    );
    assert_eq!(asset_client.balance(&ctx.client.address), 1);

    ctx.client.buy_item(&ctx.buyer, &listing_id, &PRICE);

    assert_eq!(asset_client.balance(&ctx.buyer), 1);
    assert_eq!(asset_client.balance(&ctx.seller), 0);
    assert_eq!(
        ctx.payment.balance(&ctx.seller),
        PRICE - PRICE * FEE_BPS as i128 / 10_000
    );
}

#[test]
fn test_sale_lookup_keeps_index_alive() {
    let ctx = setup_test();
    let env = &ctx.env;
    let token_id = mint_ip(&ctx, &ctx.seller);
    let listing_id = ctx.client.list_item(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &PRICE,
    );
    let key = StorageKey::TokenSale(ctx.nft.address.clone(), token_id);

    env.ledger()
        .with_mut(|li| li.sequence_number += 2 * DAY_IN_LEDGERS);
    let ttl = env.as_contract(&ctx.client.address, || env.storage().persistent().get_ttl(&key));
    assert_eq!(ttl, PERSISTENT_TTL_AMOUNT - 2 * DAY_IN_LEDGERS);

    assert_eq!(
        ctx.client.get_sale_for_token(&ctx.nft.address, &token_id),
        Some(SaleRef::Listing(listing_id))
    );

    let ttl = env.as_contract(&ctx.client.address, || env.storage().persistent().get_ttl(&key));
    assert_eq!(ttl, PERSISTENT_TTL_AMOUNT);
}
