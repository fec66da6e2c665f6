//! Plain-text views of the inventory

use scoop_ledger::{Item, Ledger, Stock};

const TUB: &str = "●";
const OPEN_TUB: &str = "◒";
const NAME_WIDTH: usize = 22;
const CELL_WIDTH: usize = 18;

fn dots(count: u32) -> String {
    vec![TUB; count as usize].join(" ")
}

/// Reserve column: one dot per tub, `Empty` when there are none
pub fn reserve_cell(reserve: u32) -> String {
    if reserve > 0 {
        dots(reserve)
    } else {
        "Empty".to_string()
    }
}

/// Stock column: one dot per whole tub plus `◒` for the open one, `Out` when empty
pub fn stock_cell(stock: Stock) -> String {
    let mut cell = dots(stock.whole());
    if stock.is_scooped() {
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(OPEN_TUB);
    }
    if cell.is_empty() {
        "Out".to_string()
    } else {
        cell
    }
}

/// Total column: `[ n ]`, with `!` appended when the item needs attention
pub fn total_cell(item: &Item) -> String {
    let mut cell = format!("[ {} ]", item.display_total());
    if item.needs_attention() {
        cell.push_str(" !");
    }
    cell
}

/// List view: items matching `query`, stocked flavors first
pub fn format_inventory_list(ledger: &Ledger, query: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:>3}  {:<name$} {:<cell$} {:<cell$} {}\n",
        "#",
        "FLAVORS",
        "RESERVE",
        "STOCK",
        "TOTAL",
        name = NAME_WIDTH,
        cell = CELL_WIDTH
    ));
    output.push_str(&"-".repeat(5 + NAME_WIDTH + 2 * (CELL_WIDTH + 1) + 8));
    output.push('\n');

    let rows = ledger.filtered_display(query);
    if rows.is_empty() {
        if query.is_empty() {
            output.push_str("No flavors yet.\n");
        } else {
            output.push_str(&format!("No flavors match '{}'.\n", query));
        }
        return output;
    }

    for (index, item) in rows {
        output.push_str(&format!(
            "{:>3}  {:<name$} {:<cell$} {:<cell$} {}\n",
            index,
            item.display_name(),
            reserve_cell(item.reserve()),
            stock_cell(item.stock()),
            total_cell(item),
            name = NAME_WIDTH,
            cell = CELL_WIDTH
        ));
    }

    output
}

/// Detail view for a single item
pub fn format_item_detail(item: &Item) -> String {
    let detail = item.detail();
    let mut output = String::new();

    output.push_str(&format!("{}\n", detail.name));
    output.push_str("-----------------------------------------------\n");
    output.push_str(&format!("Res:    {}\n", detail.reserve));
    output.push_str(&format!("Stk:    {}\n", detail.stock));
    output.push_str(&format!("Tossed: {}\n", detail.tossed));
    output.push_str(&format!("Total:  {}\n", detail.total));
    output.push_str(&format!("High:   {}\n", detail.high));
    output.push_str(&format!("Low:    {}\n", detail.low));
    if detail.needs_attention {
        output.push_str("Needs attention: reorder soon\n");
    }

    output
}
