//! Shop contract and the stock outfitter.
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::config::ShopConfig;
use crate::hunter::Hunter;
use crate::item::Item;
use crate::narration::Mailbox;
use crate::numbers::floor_f64_to_i32;

/// What the hunter came into the shop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopIntent {
    Buy(Item),
    Sell(Item),
}

/// A shop a town can hand its occupant to.
///
/// Towns treat the transaction as opaque and read nothing back.
pub trait Shop {
    fn enter<H: Hunter + ?Sized>(&mut self, hunter: &mut H, intent: ShopIntent);
}

/// Result of a single outfitter transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trade {
    Bought { item: Item, price: i32 },
    Sold { item: Item, payout: i32 },
    AlreadyOwned(Item),
    CannotAfford { item: Item, price: i32 },
    NotCarried(Item),
    NotStocked(Item),
}

/// General store selling crossing gear, shovels and swords.
#[derive(Debug, Clone, Default)]
pub struct Outfitter {
    config: ShopConfig,
    receipts: Mailbox,
}

impl Outfitter {
    #[must_use]
    pub fn new(config: ShopConfig) -> Self {
        Self {
            config,
            receipts: Mailbox::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// What the outfitter pays for an item it stocks.
    #[must_use]
    pub fn buyback(&self, item: Item) -> Option<i32> {
        self.config
            .price(item)
            .map(|price| floor_f64_to_i32(f64::from(price) * self.config.sell_ratio))
    }

    /// Run a transaction and report what happened.
    pub fn trade<H: Hunter + ?Sized>(&mut self, hunter: &mut H, intent: ShopIntent) -> Trade {
        let trade = match intent {
            ShopIntent::Buy(item) => self.buy(hunter, item),
            ShopIntent::Sell(item) => self.sell(hunter, item),
        };
        log::debug!("outfitter trade for {}: {trade:?}", hunter.name());
        self.receipts.post(describe(trade));
        trade
    }

    fn buy<H: Hunter + ?Sized>(&self, hunter: &mut H, item: Item) -> Trade {
        let Some(price) = self.config.price(item) else {
            return Trade::NotStocked(item);
        };
        if hunter.has_item(item) {
            return Trade::AlreadyOwned(item);
        }
        if hunter.gold() < price {
            return Trade::CannotAfford { item, price };
        }
        hunter.change_gold(-price);
        hunter.add_item(item);
        Trade::Bought { item, price }
    }

    fn sell<H: Hunter + ?Sized>(&self, hunter: &mut H, item: Item) -> Trade {
        let Some(payout) = self.buyback(item) else {
            return Trade::NotStocked(item);
        };
        if !hunter.remove_item(item) {
            return Trade::NotCarried(item);
        }
        hunter.change_gold(payout);
        Trade::Sold { item, payout }
    }

    /// Receipts written since the last call.
    pub fn take_receipt(&mut self) -> String {
        self.receipts.drain()
    }

    /// Price list, one item per line, cheapest first.
    #[must_use]
    pub fn listing(&self) -> String {
        let mut rows: Vec<(Item, i32)> = self
            .config
            .prices
            .iter()
            .map(|(item, price)| (*item, *price))
            .collect();
        rows.sort_by_key(|&(item, price)| (price, item));
        let mut out = String::from("Welcome to the outfitter! We have the finest wares in town.");
        for (item, price) in rows {
            let _ = write!(out, "\n{item:<8} {price:>3} gold");
        }
        out
    }
}

impl Shop for Outfitter {
    fn enter<H: Hunter + ?Sized>(&mut self, hunter: &mut H, intent: ShopIntent) {
        let _ = self.trade(hunter, intent);
    }
}

fn describe(trade: Trade) -> String {
    match trade {
        Trade::Bought { item, price } => {
            format!("Ye' got yerself a {item}. Come again soon. ({price} gold)")
        }
        Trade::Sold { item, payout } => {
            format!("Pleasure doin' business with you. ({item} for {payout} gold)")
        }
        Trade::AlreadyOwned(item) => format!("You already have a {item}."),
        Trade::CannotAfford { item, price } => {
            format!("Hmm, you don't have enough gold for a {item}. It costs {price} gold.")
        }
        Trade::NotCarried(item) => format!("We don't want none of your {item}, you ain't got one."),
        Trade::NotStocked(item) => format!("We ain't got no {item} in this shop."),
    }
}
