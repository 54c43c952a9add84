// File: src/input.rs
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::core::types::{AisleId, RawItemId, RawOrder};
use crate::error::{DatasetError, DatasetResult, TableKind};

/// Canonical names of the three raw tables, as the upstream extraction
/// scripts emit them.
pub const FREQUENCY_FILE: &str = "frqs.json";
pub const AISLE_FILE: &str = "aisles.json";
pub const ORDER_FILE: &str = "orders.json";

/// The three raw tables, parsed and integer-keyed. Map tables are held in
/// ascending numeric key order so downstream processing never depends on
/// JSON text order.
#[derive(Debug, Clone)]
pub struct RawTables {
    /// Element `i` is the order count of raw item index `i + 1`.
    pub frequencies: Vec<u64>,
    pub aisle_table: BTreeMap<AisleId, Vec<RawItemId>>,
    pub order_table: BTreeMap<u64, RawOrder>,
}

/// Loads and validates all three tables from `dir`. Any parse failure is
/// fatal and names the offending table; nothing downstream runs on a
/// partially valid input set.
pub fn load_tables(dir: &Path) -> DatasetResult<RawTables> {
    let frequencies: Vec<u64> = read_json(&dir.join(FREQUENCY_FILE), TableKind::Frequency)?;

    let raw_aisles: BTreeMap<String, Vec<String>> =
        read_json(&dir.join(AISLE_FILE), TableKind::Aisle)?;
    let mut aisle_table = BTreeMap::new();
    for (key, members) in raw_aisles {
        let aisle: AisleId = parse_int(&key, TableKind::Aisle, "aisle id")?;
        let mut items = Vec::with_capacity(members.len());
        for member in &members {
            items.push(parse_int(member, TableKind::Aisle, "aisle member")?);
        }
        aisle_table.insert(aisle, items);
    }

    let raw_orders: BTreeMap<String, Vec<String>> =
        read_json(&dir.join(ORDER_FILE), TableKind::Order)?;
    let mut order_table = BTreeMap::new();
    for (key, entries) in raw_orders {
        let id: u64 = parse_int(&key, TableKind::Order, "order id")?;
        let mut items: RawOrder = Vec::with_capacity(entries.len());
        for entry in &entries {
            items.push(parse_int(entry, TableKind::Order, "order item")?);
        }
        order_table.insert(id, items);
    }

    Ok(RawTables {
        frequencies,
        aisle_table,
        order_table,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path, table: TableKind) -> DatasetResult<T> {
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| DatasetError::malformed(table, e.to_string()))
}

/// The map tables string-encode every integer; a token that fails to parse
/// is a malformed-table fault, reported with its role and literal text.
fn parse_int<T: std::str::FromStr>(token: &str, table: TableKind, role: &str) -> DatasetResult<T> {
    token
        .parse()
        .map_err(|_| DatasetError::malformed(table, format!("{role} {token:?} is not an integer")))
}
