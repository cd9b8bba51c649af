use ipnft_custody::TokenStandard;

use crate::events::{AuctionCancelled, AuctionEnded};
use crate::test::{
    advance_ledger, mint_ip, published, setup_test, TestContext, DAY, FEE_BPS, INITIAL_BALANCE,
};
use crate::Error;

const STARTING_PRICE: i128 = 40_000;

fn start_auction(ctx: &TestContext) -> (u32, u64) {
    let token_id = mint_ip(ctx, &ctx.seller);
    let auction_id = ctx.client.create_auction(
        &ctx.seller,
        &ctx.nft.address,
        &token_id,
        &TokenStandard::NonFungible,
        &STARTING_PRICE,
        &DAY,
    );
    (token_id, auction_id)
}

#[test]
fn test_end_auction_before_end_time() {
    let ctx = setup_test();
    let (token_id, auction_id) = start_auction(&ctx);
    ctx.client.place_bid(&ctx.buyer, &auction_id, &STARTING_PRICE);

    advance_ledger(&ctx.env, DAY - 1);
    let result = ctx.client.try_end_auction(&auction_id);
    assert_eq!(result, Err(Ok(Error::AuctionNotEnded)));

    assert!(ctx.client.get_auction(&auction_id).active);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.client.address);
}

#[test]
fn test_end_auction_with_winner() {
    let ctx = setup_test();
    let (token_id, auction_id) = start_auction(&ctx);

    ctx.client.place_bid(&ctx.buyer, &auction_id, &STARTING_PRICE);
    ctx.client.place_bid(&ctx.bidder, &auction_id, &50_000);

    advance_ledger(&ctx.env, DAY);
    ctx.client.end_auction(&auction_id);

    let fee = 50_000 * FEE_BPS as i128 / 10_000;
    assert_eq!(fee, 1_250);
    assert!(published(
        &ctx,
        &AuctionEnded {
            auction_id,
            winner: ctx.bidder.clone(),
            amount: 50_000,
            fee,
        }
    ));
    assert!(!ctx.client.get_auction(&auction_id).active);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.bidder);
    assert_eq!(ctx.payment.balance(&ctx.seller), 50_000 - fee);
    assert_eq!(ctx.payment.balance(&ctx.admin), fee);
    assert_eq!(ctx.payment.balance(&ctx.buyer), INITIAL_BALANCE);
    assert_eq!(ctx.payment.balance(&ctx.bidder), INITIAL_BALANCE - 50_000);
    assert_eq!(ctx.payment.balance(&ctx.client.address), 0);
    assert_eq!(ctx.client.get_sale_for_token(&ctx.nft.address, &token_id), None);

    let stats = ctx.client.get_stats();
    assert_eq!(stats.total_sales, 1);
    assert_eq!(stats.total_volume, 50_000);
    assert_eq!(stats.total_fees, fee);

    let result = ctx.client.try_end_auction(&auction_id);
    assert_eq!(result, Err(Ok(Error::AuctionNotActive)));
}

#[test]
fn test_end_auction_without_bids_returns_token() {
    let ctx = setup_test();
    let (token_id, auction_id) = start_auction(&ctx);

    advance_ledger(&ctx.env, DAY);
    ctx.client.end_auction(&auction_id);

    assert!(published(
        &ctx,
        &AuctionCancelled {
            auction_id,
            seller: ctx.seller.clone(),
        }
    ));
    assert!(!ctx.client.get_auction(&auction_id).active);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.seller);
    assert_eq!(ctx.payment.balance(&ctx.seller), 0);
    assert_eq!(ctx.client.get_stats().total_sales, 0);
}

#[test]
fn test_end_auction_while_paused() {
    let ctx = setup_test();
    let (token_id, auction_id) = start_auction(&ctx);
    ctx.client.place_bid(&ctx.buyer, &auction_id, &STARTING_PRICE);

    ctx.client.set_paused(&ctx.admin, &true);
    advance_ledger(&ctx.env, DAY);
    ctx.client.end_auction(&auction_id);

    assert_eq!(ctx.nft.owner_of(&token_id), ctx.buyer);
}

#[test]
fn test_cancel_auction() {
    let ctx = setup_test();
    let (token_id, auction_id) = start_auction(&ctx);

    let result = ctx.client.try_cancel_auction(&ctx.buyer, &auction_id);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));

    ctx.client.cancel_auction(&ctx.seller, &auction_id);

    assert!(!ctx.client.get_auction(&auction_id).active);
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.seller);
    assert_eq!(ctx.client.get_sale_for_token(&ctx.nft.address, &token_id), None);

    let result = ctx.client.try_cancel_auction(&ctx.seller, &auction_id);
    assert_eq!(result, Err(Ok(Error::AuctionNotActive)));
}

#[test]
fn test_cancel_auction_with_bids_fails() {
    let ctx = setup_test();
    let (token_id, auction_id) = start_auction(&ctx);
    ctx.client.place_bid(&ctx.buyer, &auction_id, &STARTING_PRICE);

    let result = ctx.client.try_cancel_auction(&ctx.seller, &auction_id);
    assert_eq!(result, Err(Ok(Error::AuctionHasBids)));
    assert_eq!(ctx.nft.owner_of(&token_id), ctx.client.address);
}

#[test]
fn test_fee_change_applies_to_later_sales() {
    let ctx = setup_test();
    let (_, auction_id) = start_auction(&ctx);
    ctx.client.place_bid(&ctx.buyer, &auction_id, &STARTING_PRICE);

    ctx.client.set_fee_rate(&ctx.admin, &0);
    advance_ledger(&ctx.env, DAY);
    ctx.client.end_auction(&auction_id);

    assert_eq!(ctx.payment.balance(&ctx.seller), STARTING_PRICE);
    assert_eq!(ctx.payment.balance(&ctx.admin), 0);
}
