use ipnft_custody::{fees, move_token, TokenStandard};
use soroban_sdk::{log, token, Address, Env};

use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
use crate::types::*;
use crate::{ensure_can_sell, load_config, load_open_config, pay_out, record_sale};

pub fn create_auction(
    e: &Env,
    seller: Address,
    token: Address,
    token_id: u32,
    standard: TokenStandard,
    starting_price: i128,
    duration: u64,
) -> Result<u64, Error> {
    seller.require_auth();
    acquire_lock(e)?;

    load_open_config(e)?;

    if starting_price <= 0 {
        return Err(Error::InvalidPrice);
    }

    if !(MIN_AUCTION_DURATION..=MAX_AUCTION_DURATION).contains(&duration) {
        return Err(Error::InvalidDuration);
    }

    ensure_can_sell(e, &seller, &token, token_id, standard)?;

    let now = e.ledger().timestamp();
    let end_time = now
        .checked_add(duration)
        .ok_or(Error::ArithmeticOverflow)?;

    let auction_id = next_auction_id(e);
    let auction = Auction {
        auction_id,
        token: token.clone(),
        token_id,
        standard,
        seller: seller.clone(),
        starting_price,
        current_bid: 0,
        current_bidder: None,
        end_time,
        active: true,
        created_at: now,
    };

    set_auction(e, &auction);
    set_token_sale(e, &token, token_id, &SaleRef::Auction(auction_id));

    let mut stats = get_stats(e);
    stats.total_auctions += 1;
    set_stats(e, &stats);

    move_token(
        e,
        standard,
        &token,
        token_id,
        &seller,
        &e.current_contract_address(),
    );

    AuctionCreated {
        auction_id,
        seller,
        token,
        token_id,
        standard,
        starting_price,
        end_time,
    }
    .publish(e);

    release_lock(e);
    extend_instance_ttl(e);
    Ok(auction_id)
}

/// Smallest bid `auction` accepts next.
///
/// The starting price until the first bid; afterwards the current bid plus
/// 5%, and never less than one unit more so bids strictly increase.
pub fn minimum_bid(auction: &Auction) -> Option<i128> {
    if auction.current_bidder.is_none() {
        return Some(auction.starting_price);
    }
    let increment = auction
        .current_bid
        .checked_mul(MIN_BID_INCREMENT_BPS)?
        / fees::BPS_DENOMINATOR as i128;
    auction.current_bid.checked_add(increment.max(1))
}

pub fn place_bid(e: &Env, bidder: Address, auction_id: u64, amount: i128) -> Result<(), Error> {
    bidder.require_auth();
    acquire_lock(e)?;

    let config = load_open_config(e)?;

    let mut auction = get_auction(e, auction_id).ok_or(Error::AuctionNotFound)?;

    if !auction.active {
        return Err(Error::AuctionNotActive);
    }

    let now = e.ledger().timestamp();
    if now >= auction.end_time {
        return Err(Error::AuctionEnded);
    }

    if bidder == auction.seller {
        return Err(Error::SellerCannotBid);
    }

    let min_bid = minimum_bid(&auction).ok_or(Error::ArithmeticOverflow)?;
    if amount < min_bid {
        return Err(Error::BidTooLow);
    }

    let contract = e.current_contract_address();
    let payment_client = token::Client::new(e, &config.payment_token);

    // The outbid bidder gets their funds back before the new bid is taken.
    if let Some(previous_bidder) = auction.current_bidder.clone() {
        payment_client.transfer(&contract, &previous_bidder, &auction.current_bid);
    }
    payment_client.transfer(&bidder, &contract, &amount);

    auction.current_bid = amount;
    auction.current_bidder = Some(bidder.clone());

    let extended = auction.end_time - now < AUCTION_EXTENSION_WINDOW;
    if extended {
        auction.end_time = now + AUCTION_EXTENSION_WINDOW;
    }

    set_auction(e, &auction);
    add_bid_to_history(
        e,
        auction_id,
        Bid {
            bidder: bidder.clone(),
            amount,
            timestamp: now,
        },
    );

    BidPlaced {
        auction_id,
        bidder,
        amount,
    }
    .publish(e);

    if extended {
        log!(e, "auction {} extended to {}", auction_id, auction.end_time);
        AuctionExtended {
            auction_id,
            new_end_time: auction.end_time,
        }
        .publish(e);
    }

    release_lock(e);
    extend_instance_ttl(e);
    Ok(())
}

pub fn end_auction(e: &Env, auction_id: u64) -> Result<(), Error> {
    acquire_lock(e)?;

    let config = load_config(e)?;

    let mut auction = get_auction(e, auction_id).ok_or(Error::AuctionNotFound)?;

    if !auction.active {
        return Err(Error::AuctionNotActive);
    }

    if e.ledger().timestamp() < auction.end_time {
        return Err(Error::AuctionNotEnded);
    }

    auction.active = false;
    set_auction(e, &auction);
    clear_token_sale(e, &auction.token, auction.token_id);

    let contract = e.current_contract_address();

    match auction.current_bidder.clone() {
        Some(winner) => {
            let (seller_amount, fee) = fees::split(auction.current_bid, config.fee_bps)
                .ok_or(Error::ArithmeticOverflow)?;
            record_sale(e, auction.current_bid, fee)?;

            pay_out(e, &config, &auction.seller, seller_amount, fee);
            move_token(
                e,
                auction.standard,
                &auction.token,
                auction.token_id,
                &contract,
                &winner,
            );

            AuctionEnded {
                auction_id,
                winner,
                amount: auction.current_bid,
                fee,
            }
            .publish(e);
        }
        None => {
            move_token(
                e,
                auction.standard,
                &auction.token,
                auction.token_id,
                &contract,
                &auction.seller,
            );

            AuctionCancelled {
                auction_id,
                seller: auction.seller,
            }
            .publish(e);
        }
    }

    release_lock(e);
    extend_instance_ttl(e);
    Ok(())
}

pub fn cancel_auction(e: &Env, seller: Address, auction_id: u64) -> Result<(), Error> {
    seller.require_auth();
    acquire_lock(e)?;

    load_config(e)?;

    let mut auction = get_auction(e, auction_id).ok_or(Error::AuctionNotFound)?;

    if auction.seller != seller {
        return Err(Error::Unauthorized);
    }

    if !auction.active {
        return Err(Error::AuctionNotActive);
    }

    if auction.current_bidder.is_some() {
        return Err(Error::AuctionHasBids);
    }

    auction.active = false;
    set_auction(e, &auction);
    clear_token_sale(e, &auction.token, auction.token_id);

    move_token(
        e,
        auction.standard,
        &auction.token,
        auction.token_id,
        &e.current_contract_address(),
        &seller,
    );

    AuctionCancelled { auction_id, seller }.publish(e);

    release_lock(e);
    extend_instance_ttl(e);
    Ok(())
}
