//! Snapshot renderer
//!
//! Turns one `Snapshot` into text and HTML fragments and writes them to the
//! dashboard elements. Every poll clears and rebuilds the lists, so the cards and
//! the aggregate total always come from the same snapshot. The summary and the
//! history are written separately so the chart can be fed in between.

use html_escape::encode_text;

use crate::config::{Config, DisplayZone};
use crate::error::Result;
use crate::format::{self, fixed};
use crate::surface::{DomSurface, InsertPosition, ids};
use crate::types::{Holding, Snapshot, TradeRecord};

/// Shown in place of the next-cycle time when no cycle is scheduled
pub const AWAITING_LABEL: &str = "Awaiting...";

/// Shown in place of a price the backend did not provide
pub const PRICE_UNAVAILABLE: &str = "N/A";

pub const EMPTY_HISTORY_HTML: &str =
    r#"<p class="text-gray-500 text-center">No trade history yet.</p>"#;

const BUY_CLASS: &str = "text-green-400";
const SELL_CLASS: &str = "text-red-400";

const DEFAULT_GLYPH: &str = "💎";

const GLYPHS: [(&str, &str); 12] = [
    ("BTCUSDT", "₿"),
    ("ETHUSDT", "Ξ"),
    ("SOLUSDT", " Solana"),
    ("BNBUSDT", " BNB"),
    ("DOGEUSDT", "🐕"),
    ("LINKUSDT", "🔗"),
    ("ADAUSDT", " Cardano"),
    ("FETUSDT", "🤖"),
    ("AVAXUSDT", "❄️"),
    ("OMUSDT", "☸️"),
    ("RNDRUSDT", "💡"),
    ("TRUMPUSDT", "🏛️"),
];

/// Display glyph for a pair symbol
pub fn glyph_for(symbol: &str) -> &'static str {
    GLYPHS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map_or(DEFAULT_GLYPH, |(_, glyph)| glyph)
}

/// One rendered portfolio card
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioCard {
    pub asset: String,
    pub glyph: &'static str,
    pub price: Option<f64>,
    pub amount: f64,
    pub value: f64,
}

impl PortfolioCard {
    pub fn to_html(&self) -> String {
        let price = self
            .price
            .map_or_else(|| PRICE_UNAVAILABLE.to_string(), |p| fixed(p, 4));
        format!(
            r#"<div class="bg-gray-700 rounded-lg p-4 shadow-md flex items-center justify-between">
    <div>
        <h3 class="text-xl font-semibold">{asset} {glyph}</h3>
        <p class="text-gray-400">Price: ${price}</p>
        <p class="text-gray-400">Quantity: {amount}</p>
    </div>
    <div class="text-right">
        <p class="text-green-300 text-lg font-bold">Value: ${value}</p>
    </div>
</div>"#,
            asset = encode_text(&self.asset),
            glyph = self.glyph,
            amount = fixed(self.amount, 4),
            value = fixed(self.value, 2),
        )
    }
}

/// Everything one snapshot contributes to the page
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub status: String,
    pub usdt: String,
    pub next_cycle: String,
    pub cards: Vec<PortfolioCard>,
    /// Non-cash position values plus the cash amount
    pub total_value: f64,
    /// History fragments in the order the backend sent them
    pub history: Vec<String>,
}

/// Builds and writes the dashboard view
#[derive(Debug, Clone)]
pub struct Renderer {
    cash_symbol: String,
    quote_suffix: String,
    zone: DisplayZone,
}

impl Renderer {
    pub fn new(config: &Config) -> Self {
        Self {
            cash_symbol: config.cash_symbol.clone(),
            quote_suffix: config.quote_suffix.clone(),
            zone: config.time_zone,
        }
    }

    /// Value a holding contributes to the total (cash counts at its amount)
    fn holding_value(&self, symbol: &str, holding: &Holding) -> f64 {
        if symbol == self.cash_symbol {
            holding.amount
        } else {
            holding.value()
        }
    }

    /// Derive the full view for a snapshot without touching the page
    pub fn view(&self, snapshot: &Snapshot) -> DashboardView {
        let mut total_value = 0.0;
        let mut cards = Vec::with_capacity(snapshot.portfolio.len());

        for (symbol, holding) in snapshot.portfolio.iter() {
            let value = self.holding_value(symbol, holding);
            total_value += value;
            if symbol == self.cash_symbol {
                continue;
            }
            cards.push(PortfolioCard {
                asset: format::display_symbol(symbol, &self.quote_suffix),
                glyph: glyph_for(symbol),
                price: holding.display_price(),
                amount: holding.amount,
                value,
            });
        }

        DashboardView {
            status: snapshot.status.clone(),
            usdt: fixed(snapshot.usdt, 2),
            next_cycle: snapshot
                .scheduled_cycle()
                .map_or_else(|| AWAITING_LABEL.to_string(), |t| format::unix_seconds(t, self.zone)),
            cards,
            total_value,
            history: snapshot.history.iter().map(|t| self.history_html(t)).collect(),
        }
    }

    fn history_html(&self, trade: &TradeRecord) -> String {
        let class = if trade.is_buy() { BUY_CLASS } else { SELL_CLASS };
        format!(
            r#"<div class="bg-gray-700 rounded-lg p-3 shadow-md">
    <p class="text-sm text-gray-400">{time}</p>
    <p class="{class} font-semibold">{kind}: {quantity} {asset} @ ${price}</p>
</div>"#,
            time = encode_text(&format::trade_time(trade.timestamp.as_ref(), self.zone)),
            kind = encode_text(&trade.kind),
            quantity = fixed(trade.quantity, 4),
            asset = encode_text(&format::display_symbol(&trade.symbol, &self.quote_suffix)),
            price = fixed(trade.price, 4),
        )
    }
}

impl DashboardView {
    /// Write status, balance, next cycle and the portfolio cards
    pub fn write_summary(&self, dom: &dyn DomSurface) -> Result<()> {
        dom.set_text(ids::STATUS_MESSAGE, &self.status)?;
        dom.set_text(ids::USDT_BALANCE, &self.usdt)?;
        dom.set_text(ids::NEXT_CYCLE_TIME, &self.next_cycle)?;

        dom.set_html(ids::PORTFOLIO_LIST, "")?;
        for card in &self.cards {
            dom.insert_html(ids::PORTFOLIO_LIST, InsertPosition::BeforeEnd, &card.to_html())?;
        }
        Ok(())
    }

    /// Rebuild the trade history list
    pub fn write_history(&self, dom: &dyn DomSurface) -> Result<()> {
        dom.set_html(ids::HISTORY_LIST, "")?;
        if self.history.is_empty() {
            return dom.set_html(ids::HISTORY_LIST, EMPTY_HISTORY_HTML);
        }
        // Each entry goes on top, so the last one sent ends up first
        for entry in &self.history {
            dom.insert_html(ids::HISTORY_LIST, InsertPosition::AfterBegin, entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDom, snapshot_json};

    fn renderer() -> Renderer {
        Renderer::new(&Config { time_zone: DisplayZone::Utc, ..Config::default() })
    }

    fn render(dom: &FakeDom, snapshot: &Snapshot) -> f64 {
        let view = renderer().view(snapshot);
        view.write_summary(dom).expect("summary");
        view.write_history(dom).expect("history");
        view.total_value
    }

    #[test]
    fn test_glyph_table() {
        assert_eq!(glyph_for("BTCUSDT"), "₿");
        assert_eq!(glyph_for("TRUMPUSDT"), "🏛️");
        assert_eq!(glyph_for("PEPEUSDT"), DEFAULT_GLYPH);
    }

    #[test]
    fn test_reference_scenario() {
        let snapshot = snapshot_json(
            r#"{"status": "running", "usdt": "100.50", "next_cycle_time": 0,
                "portfolio": {"USDT": {"amount": 100.5, "current_price": 1},
                              "BTCUSDT": {"amount": 0.01, "current_price": 60000}},
                "history": []}"#,
        );
        let dom = FakeDom::default();

        let total = render(&dom, &snapshot);

        assert!((total - 700.5).abs() < 1e-9);
        assert_eq!(dom.text(ids::STATUS_MESSAGE), "running");
        assert_eq!(dom.text(ids::USDT_BALANCE), "100.50");
        assert_eq!(dom.text(ids::NEXT_CYCLE_TIME), AWAITING_LABEL);

        let cards = dom.children(ids::PORTFOLIO_LIST);
        assert_eq!(cards.len(), 1);
        assert!(cards[0].contains("BTC ₿"));
        assert!(cards[0].contains("Value: $600.00"));
        assert!(cards[0].contains("Price: $60000.0000"));
        assert!(cards[0].contains("Quantity: 0.0100"));

        assert_eq!(dom.children(ids::HISTORY_LIST), [EMPTY_HISTORY_HTML]);
    }

    #[test]
    fn test_cash_excluded_from_cards_but_counted() {
        let snapshot = snapshot_json(
            r#"{"usdt": 50, "portfolio": {
                "ETHUSDT": {"amount": 2, "current_price": 1500},
                "USDT": {"amount": 50, "current_price": 99},
                "DOGEUSDT": {"amount": 1000, "current_price": "0.1"}}}"#,
        );

        let view = renderer().view(&snapshot);

        let assets: Vec<&str> = view.cards.iter().map(|c| c.asset.as_str()).collect();
        assert_eq!(assets, ["ETH", "DOGE"]);
        assert!((view.total_value - (3000.0 + 50.0 + 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_price_shows_marker() {
        let snapshot = snapshot_json(
            r#"{"portfolio": {"FETUSDT": {"amount": 3, "current_price": null},
                              "OMUSDT": {"amount": 1, "current_price": 0}}}"#,
        );

        let view = renderer().view(&snapshot);

        assert!(view.cards.iter().all(|c| c.price.is_none()));
        assert!(view.cards[0].to_html().contains("Price: $N/A"));

        // No price means no value: the card and the total both read NaN
        assert!(view.cards[0].to_html().contains("Value: $NaN"));
        assert!(view.cards[1].to_html().contains("Value: $0.00"));
        assert!(view.total_value.is_nan());
    }

    #[test]
    fn test_scheduled_cycle_is_formatted() {
        let snapshot = snapshot_json(r#"{"next_cycle_time": 1700000000}"#);
        let view = renderer().view(&snapshot);
        assert_eq!(view.next_cycle, "11/14/2023, 10:13:20 PM");

        let unscheduled = snapshot_json(r#"{"next_cycle_time": -5}"#);
        assert_eq!(renderer().view(&unscheduled).next_cycle, AWAITING_LABEL);
    }

    #[test]
    fn test_history_newest_first() {
        let snapshot = snapshot_json(
            r#"{"history": [
                {"timestamp": "2024-05-01T10:00:00", "type": "BUY", "symbol": "BTCUSDT", "quantity": "0.001", "price": "60000"},
                {"timestamp": "2024-05-01T11:00:00", "type": "SELL", "symbol": "ETHUSDT", "quantity": 0.5, "price": 3000.5}
            ]}"#,
        );
        let dom = FakeDom::default();

        render(&dom, &snapshot);

        let entries = dom.children(ids::HISTORY_LIST);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("text-red-400"));
        assert!(entries[0].contains("SELL: 0.5000 ETH @ $3000.5000"));
        assert!(entries[0].contains("5/1/2024, 11:00:00 AM"));
        assert!(entries[1].contains("text-green-400"));
        assert!(entries[1].contains("BUY: 0.0010 BTC @ $60000.0000"));
    }

    #[test]
    fn test_rerender_replaces_previous_lists() {
        let dom = FakeDom::default();
        let first = snapshot_json(
            r#"{"portfolio": {"BTCUSDT": {"amount": 1, "current_price": 10}, "ETHUSDT": {"amount": 1, "current_price": 5}}}"#,
        );
        let second = snapshot_json(r#"{"portfolio": {"SOLUSDT": {"amount": 2, "current_price": 100}}}"#);

        render(&dom, &first);
        render(&dom, &second);

        let cards = dom.children(ids::PORTFOLIO_LIST);
        assert_eq!(cards.len(), 1);
        assert!(cards[0].contains("SOL  Solana"));
    }

    #[test]
    fn test_markup_in_symbols_is_escaped() {
        let snapshot = snapshot_json(
            r#"{"portfolio": {"<img>USDT": {"amount": 1, "current_price": 1}}}"#,
        );
        let html = renderer().view(&snapshot).cards[0].to_html();
        assert!(html.contains("&lt;img&gt;"));
        assert!(!html.contains("<img>"));
    }

    #[test]
    fn test_ampersands_and_quotes_in_history() {
        let snapshot = snapshot_json(
            r#"{"history": [{"timestamp": 0, "type": "B&S", "symbol": "\"Q\"USDT", "quantity": 1, "price": 2}]}"#,
        );
        let entry = &renderer().view(&snapshot).history[0];
        assert!(entry.contains("B&amp;S: 1.0000 \"Q\" @ $2.0000"));
        assert!(!entry.contains("B&S"));
    }

    #[test]
    fn test_balance_rounds_ties_up() {
        let snapshot = snapshot_json(
            r#"{"usdt": "100.125", "portfolio": {"ETHUSDT": {"amount": 0.5, "current_price": 0.25}}}"#,
        );
        let view = renderer().view(&snapshot);
        assert_eq!(view.usdt, "100.13");
        assert!(view.cards[0].to_html().contains("Value: $0.13"));
    }
}
