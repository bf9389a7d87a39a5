//! Report Export Encoder
//!
//! Flattens orders and their line items into the CSV the reports page
//! downloads. Order-level columns (date, time, payment type, order
//! total) print once per order, on its first line; a trailing summary
//! row carries the grand total.

use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::orders::money;
use crate::utils::time;
use shared::models::OrderWithItems;

const HEADERS: [&str; 8] = [
    "Date",
    "Time",
    "Item Name",
    "Quantity",
    "Unit Price",
    "Item Total",
    "Payment Type",
    "Order Total",
];

/// Encode orders (typically the paid orders of a report range) as CSV.
///
/// Every data cell is wrapped in double quotes. Embedded quotes are
/// not escaped, matching the report consumers downstream.
pub fn encode_csv(orders: &[OrderWithItems], tz: Tz) -> String {
    let mut rows: Vec<[String; 8]> = Vec::new();
    let mut total_sum = Decimal::ZERO;

    for entry in orders {
        let order = &entry.order;
        let local = time::to_local(order.created_at, tz);
        let date_str = local.format("%d/%m/%Y").to_string();
        let time_str = local.format("%-I:%M:%S %p").to_string();
        total_sum += money::to_decimal(order.total_amount);

        if entry.items.is_empty() {
            // Order-level columns only
            rows.push([
                date_str,
                time_str,
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                order.payment_type.as_str().to_string(),
                money::format_amount(money::to_decimal(order.total_amount)),
            ]);
            continue;
        }

        for (index, item) in entry.items.iter().enumerate() {
            let first = index == 0;
            let item_total = money::line_total(item.item_price_snapshot, item.quantity);
            rows.push([
                if first { date_str.clone() } else { String::new() },
                if first { time_str.clone() } else { String::new() },
                item.item_name_snapshot.clone(),
                item.quantity.to_string(),
                money::format_amount(money::to_decimal(item.item_price_snapshot)),
                money::format_amount(item_total),
                if first {
                    order.payment_type.as_str().to_string()
                } else {
                    String::new()
                },
                if first {
                    money::format_amount(money::to_decimal(order.total_amount))
                } else {
                    String::new()
                },
            ]);
        }
    }

    // Summary row: grand total over all included orders
    rows.push([
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        "TOTAL".to_string(),
        money::format_amount(total_sum),
    ]);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADERS.join(","));
    for row in rows {
        let quoted: Vec<String> = row.iter().map(|cell| format!("\"{}\"", cell)).collect();
        lines.push(quoted.join(","));
    }
    lines.join("\n")
}
