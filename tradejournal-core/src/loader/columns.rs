//! Header discovery: maps export columns to trade fields.
//!
//! Broker and prop-firm exports disagree on column names (`P&L`, `Profit`,
//! `Net Profit`, ...), so headers are normalised to lower-case
//! alphanumerics and matched against alias lists in priority order.
//! Headers with a `%` are never discovered. Explicit names from
//! configuration bypass discovery.

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::LoadError;

/// A trade field the loader knows how to fill from a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Timestamp,
    Instrument,
    ProfitLoss,
    EntryTime,
    Size,
    EntryPrice,
    ExitPrice,
    Side,
}

impl ColumnRole {
    /// Normalised header aliases, most specific first.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            ColumnRole::Timestamp => &[
                "exittime",
                "closetime",
                "exitdate",
                "closedate",
                "closingtime",
                "timeclosed",
                "timestamp",
                "datetime",
                "time",
                "date",
            ],
            ColumnRole::Instrument => &[
                "symbol",
                "instrument",
                "pair",
                "currencypair",
                "ticker",
                "market",
                "asset",
                "item",
            ],
            ColumnRole::ProfitLoss => &[
                "pl",
                "pnl",
                "profitloss",
                "netpl",
                "netpnl",
                "netprofit",
                "realizedpl",
                "realizedpnl",
                "profit",
                "gainloss",
                "result",
            ],
            ColumnRole::EntryTime => &[
                "entrytime",
                "opentime",
                "entrydate",
                "opendate",
                "openingtime",
                "timeopened",
            ],
            ColumnRole::Size => &[
                "size",
                "volume",
                "lots",
                "lot",
                "quantity",
                "qty",
                "positionsize",
            ],
            ColumnRole::EntryPrice => &["entryprice", "openprice", "priceopen"],
            ColumnRole::ExitPrice => &["exitprice", "closeprice", "priceclose"],
            ColumnRole::Side => &["side", "direction", "type", "action"],
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::Timestamp => "timestamp",
            ColumnRole::Instrument => "instrument",
            ColumnRole::ProfitLoss => "profit/loss",
            ColumnRole::EntryTime => "entry time",
            ColumnRole::Size => "size",
            ColumnRole::EntryPrice => "entry price",
            ColumnRole::ExitPrice => "exit price",
            ColumnRole::Side => "side",
        };
        f.write_str(name)
    }
}

/// Explicit header names that override discovery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnOverrides {
    pub timestamp: Option<String>,
    pub instrument: Option<String>,
    pub profit_loss: Option<String>,
    pub size: Option<String>,
}

impl ColumnOverrides {
    fn get(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::Timestamp => self.timestamp.as_deref(),
            ColumnRole::Instrument => self.instrument.as_deref(),
            ColumnRole::ProfitLoss => self.profit_loss.as_deref(),
            ColumnRole::Size => self.size.as_deref(),
            _ => None,
        }
    }
}

/// Header name bound to a role, as reported in load diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAssignment {
    pub role: ColumnRole,
    pub header: String,
}

/// Resolved column indices for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub timestamp: usize,
    pub profit_loss: usize,
    pub instrument: Option<usize>,
    pub entry_time: Option<usize>,
    pub size: Option<usize>,
    pub entry_price: Option<usize>,
    pub exit_price: Option<usize>,
    pub side: Option<usize>,
    headers: Vec<String>,
}

const OPTIONAL_ROLES: [ColumnRole; 6] = [
    ColumnRole::Instrument,
    ColumnRole::EntryTime,
    ColumnRole::Size,
    ColumnRole::EntryPrice,
    ColumnRole::ExitPrice,
    ColumnRole::Side,
];

impl ColumnMap {
    /// Resolve every role against a header row.
    ///
    /// Timestamp and profit/loss are required; everything else is optional.
    /// A column is bound to at most one role.
    pub fn discover(
        headers: &StringRecord,
        overrides: &ColumnOverrides,
    ) -> Result<Self, LoadError> {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        if headers.iter().all(|h| normalize(h).is_empty()) {
            return Err(LoadError::MissingHeader);
        }
        let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
        // `P&L %` normalises like `P&L`; percentage columns are only bound by name.
        let mut taken: Vec<bool> = headers.iter().map(|h| h.contains('%')).collect();

        let mut resolve = |role: ColumnRole| -> Result<Option<usize>, LoadError> {
            if let Some(name) = overrides.get(role) {
                let wanted = normalize(name);
                let idx = headers
                    .iter()
                    .position(|h| h == name.trim())
                    .or_else(|| normalized.iter().position(|h| *h == wanted))
                    .ok_or_else(|| LoadError::UnknownColumn {
                        role,
                        name: name.to_string(),
                    })?;
                taken[idx] = true;
                return Ok(Some(idx));
            }
            let found = role.aliases().iter().find_map(|alias| {
                normalized
                    .iter()
                    .enumerate()
                    .find(|(i, h)| !taken[*i] && h.as_str() == *alias)
                    .map(|(i, _)| i)
            });
            if let Some(idx) = found {
                taken[idx] = true;
            }
            Ok(found)
        };

        let missing = |role: ColumnRole| LoadError::MissingColumn {
            role,
            headers: headers.join(", "),
        };

        let timestamp =
            resolve(ColumnRole::Timestamp)?.ok_or_else(|| missing(ColumnRole::Timestamp))?;
        let profit_loss =
            resolve(ColumnRole::ProfitLoss)?.ok_or_else(|| missing(ColumnRole::ProfitLoss))?;

        let mut optional = [None; OPTIONAL_ROLES.len()];
        for (slot, role) in optional.iter_mut().zip(OPTIONAL_ROLES) {
            *slot = resolve(role)?;
        }
        let [instrument, entry_time, size, entry_price, exit_price, side] = optional;

        Ok(Self {
            timestamp,
            profit_loss,
            instrument,
            entry_time,
            size,
            entry_price,
            exit_price,
            side,
            headers,
        })
    }

    /// Header names as they appeared in the file (trimmed).
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Role → header bindings, required roles first.
    pub fn assignments(&self) -> Vec<ColumnAssignment> {
        let bound = [
            (ColumnRole::Timestamp, Some(self.timestamp)),
            (ColumnRole::ProfitLoss, Some(self.profit_loss)),
            (ColumnRole::Instrument, self.instrument),
            (ColumnRole::EntryTime, self.entry_time),
            (ColumnRole::Size, self.size),
            (ColumnRole::EntryPrice, self.entry_price),
            (ColumnRole::ExitPrice, self.exit_price),
            (ColumnRole::Side, self.side),
        ];
        bound
            .into_iter()
            .filter_map(|(role, idx)| {
                idx.map(|i| ColumnAssignment {
                    role,
                    header: self.headers[i].clone(),
                })
            })
            .collect()
    }
}

/// Lower-case alphanumerics only: `"P&L"` → `"pl"`, `"Exit Time"` → `"exittime"`.
pub fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> StringRecord {
        StringRecord::from(cols.to_vec())
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("P&L"), "pl");
        assert_eq!(normalize(" Exit Time "), "exittime");
        assert_eq!(normalize("\u{feff}Symbol"), "symbol");
        assert_eq!(normalize("Net P/L ($)"), "netpl");
    }

    #[test]
    fn discovers_prop_firm_export_layout() {
        let h = header(&["Symbol", "Entry Time", "Exit Time", "Size", "P&L"]);
        let map = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap();
        assert_eq!(map.timestamp, 2);
        assert_eq!(map.entry_time, Some(1));
        assert_eq!(map.instrument, Some(0));
        assert_eq!(map.size, Some(3));
        assert_eq!(map.profit_loss, 4);
    }

    #[test]
    fn percentage_columns_are_not_discovered() {
        let h = header(&["Symbol", "Close Time", "P&L %", "P&L"]);
        let map = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap();
        assert_eq!(map.profit_loss, 3);

        let only_pct = header(&["Close Time", "P&L %"]);
        let err = ColumnMap::discover(&only_pct, &ColumnOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                role: ColumnRole::ProfitLoss,
                ..
            }
        ));

        let overrides = ColumnOverrides {
            profit_loss: Some("P&L %".to_string()),
            ..Default::default()
        };
        let map = ColumnMap::discover(&only_pct, &overrides).unwrap();
        assert_eq!(map.profit_loss, 1);
    }

    #[test]
    fn exit_time_wins_over_generic_time() {
        let h = header(&["Time", "Close Time", "Pair", "Profit"]);
        let map = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap();
        assert_eq!(map.timestamp, 1);
        assert_eq!(map.profit_loss, 3);
    }

    #[test]
    fn column_order_does_not_matter() {
        let h = header(&["pnl", "instrument", "timestamp"]);
        let map = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap();
        assert_eq!(map.timestamp, 2);
        assert_eq!(map.instrument, Some(1));
        assert_eq!(map.profit_loss, 0);
    }

    #[test]
    fn instrument_is_optional() {
        let h = header(&["Date", "Profit"]);
        let map = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap();
        assert_eq!(map.instrument, None);
        assert_eq!(map.assignments().len(), 2);
    }

    #[test]
    fn missing_pnl_column_is_an_error() {
        let h = header(&["Exit Time", "Symbol", "Size"]);
        let err = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                role: ColumnRole::ProfitLoss,
                ..
            }
        ));
    }

    #[test]
    fn blank_header_is_missing_header() {
        let h = header(&["", " "]);
        let err = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn overrides_bind_unusual_names() {
        let h = header(&["Closed At", "Contract", "Realised Amount"]);
        let overrides = ColumnOverrides {
            timestamp: Some("Closed At".into()),
            instrument: Some("contract".into()),
            profit_loss: Some("Realised Amount".into()),
            size: None,
        };
        let map = ColumnMap::discover(&h, &overrides).unwrap();
        assert_eq!(map.timestamp, 0);
        assert_eq!(map.instrument, Some(1));
        assert_eq!(map.profit_loss, 2);
    }

    #[test]
    fn unknown_override_is_an_error() {
        let h = header(&["Exit Time", "P&L"]);
        let overrides = ColumnOverrides {
            profit_loss: Some("Net".into()),
            ..Default::default()
        };
        let err = ColumnMap::discover(&h, &overrides).unwrap_err();
        assert!(matches!(err, LoadError::UnknownColumn { .. }));
    }

    #[test]
    fn a_column_binds_to_one_role_only() {
        // "Date" could serve as timestamp; entry-time aliases must not steal it.
        let h = header(&["Date", "Open Date", "Profit"]);
        let map = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap();
        assert_eq!(map.timestamp, 0);
        assert_eq!(map.entry_time, Some(1));
    }

    #[test]
    fn assignments_report_original_header_text() {
        let h = header(&["Symbol", "Exit Time", "P&L"]);
        let map = ColumnMap::discover(&h, &ColumnOverrides::default()).unwrap();
        let assignments = map.assignments();
        assert_eq!(assignments[0].header, "Exit Time");
        assert_eq!(assignments[1].header, "P&L");
        assert_eq!(assignments[2].role, ColumnRole::Instrument);
    }
}
