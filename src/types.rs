//! Wire types for the dashboard backend
//!
//! The backend is loose about numbers: balances and trade fields arrive as JSON
//! numbers, numeric strings, or placeholders such as `"N/A"`. Everything numeric is
//! decoded the way `parseFloat` would read it, with NaN for unreadable values.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// One poll payload from `GET /data`
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub status: String,

    /// Uninvested quote balance
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub usdt: f64,

    /// Unix seconds of the next bot cycle (0 or absent = not scheduled)
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub next_cycle_time: Option<f64>,

    #[serde(default)]
    pub portfolio: Portfolio,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub history: Vec<TradeRecord>,
}

impl Snapshot {
    /// Next cycle time, if it names a real moment
    pub fn scheduled_cycle(&self) -> Option<f64> {
        self.next_cycle_time.filter(|t| *t > 0.0)
    }
}

/// Holdings keyed by pair symbol, in the order the backend sent them
#[derive(Debug, Clone, Default)]
pub struct Portfolio(Vec<(String, Holding)>);

impl Portfolio {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Holding)> {
        self.0.iter().map(|(symbol, holding)| (symbol.as_str(), holding))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Portfolio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PortfolioVisitor;

        impl<'de> Visitor<'de> for PortfolioVisitor {
            type Value = Portfolio;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of symbol to holding")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Portfolio, E> {
                Ok(Portfolio::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Portfolio, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((symbol, holding)) = map.next_entry::<String, Holding>()? {
                    // Later duplicates overwrite in place, like object keys
                    if let Some(slot) = entries.iter_mut().find(|(s, _)| *s == symbol) {
                        slot.1 = holding;
                    } else {
                        entries.push((symbol, holding));
                    }
                }
                Ok(Portfolio(entries))
            }
        }

        deserializer.deserialize_any(PortfolioVisitor)
    }
}

/// A single portfolio position
#[derive(Debug, Clone, Deserialize)]
pub struct Holding {
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub amount: f64,

    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub current_price: Option<f64>,
}

impl Holding {
    /// Price usable for display (absent, zero and NaN all count as missing)
    pub fn display_price(&self) -> Option<f64> {
        self.current_price.filter(|p| *p != 0.0 && !p.is_nan())
    }

    /// Position value in quote currency; NaN when the price is missing
    pub fn value(&self) -> f64 {
        self.amount * self.current_price.unwrap_or(f64::NAN)
    }
}

/// Executed trade entry from the bot history
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub timestamp: Option<TradeTime>,

    /// Trade direction as sent by the backend (`BUY` or `SELL`)
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub symbol: String,

    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub quantity: f64,

    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub price: f64,
}

impl TradeRecord {
    pub fn is_buy(&self) -> bool {
        self.kind == "BUY"
    }
}

/// Trade timestamp: ISO-8601 text or epoch milliseconds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TradeTime {
    Text(String),
    Millis(f64),
}

/// Bot control actions exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    Start,
    Stop,
}

impl fmt::Display for BotAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotAction::Start => write!(f, "start"),
            BotAction::Stop => write!(f, "stop"),
        }
    }
}

/// Reply body of `POST /start_bot` and `POST /stop_bot`
#[derive(Debug, Clone, Deserialize)]
pub struct ActionReply {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl ActionReply {
    pub const SUCCESS: &'static str = "success";

    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS
    }
}

fn nan() -> f64 {
    f64::NAN
}

/// Read a JSON number or numeric string; anything unreadable becomes NaN
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(f64::NAN))
}

/// Like `lenient_f64`, but `null` stays absent
fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    struct NumberLike;

    impl Visitor<'_> for NumberLike {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(Some(f64::NAN))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.trim().parse().unwrap_or(f64::NAN)))
        }
    }

    deserializer.deserialize_any(NumberLike)
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
