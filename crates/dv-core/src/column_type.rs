//! Column type registry
//!
//! Each scalar kind knows how to coerce a raw cell, derive a domain from a
//! column and test a value against a brushed range. Both kinds compare in
//! scaled (pixel) space, so they share the same brush intersection logic.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::record::Value;
use crate::scale::Scale;
use crate::selection::BrushExtent;

/// The value range a dimension occupies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Domain {
    /// `[min, max]` of the present values
    Numeric { min: f64, max: f64 },
    /// Distinct values, sorted lexicographically
    Categorical(Vec<String>),
}

impl Domain {
    /// Zero spread: one distinct value, or none at all
    pub fn is_degenerate(&self) -> bool {
        match self {
            Domain::Numeric { min, max } => min == max,
            Domain::Categorical(values) => values.len() <= 1,
        }
    }
}

/// Scalar kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Categorical,
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "Number",
            ColumnType::Categorical => "String",
        }
    }

    /// Look a kind up by its registry name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Number" | "Numeric" | "number" | "numeric" => Some(ColumnType::Numeric),
            "String" | "Categorical" | "string" | "categorical" => Some(ColumnType::Categorical),
            _ => None,
        }
    }

    /// Coerce a raw cell. Unparseable numbers become absent, never NaN.
    pub fn coerce(&self, raw: &str) -> Option<Value> {
        match self {
            ColumnType::Numeric => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::Number),
            ColumnType::Categorical => Some(Value::Text(raw.to_string())),
        }
    }

    /// Derive the domain of a column, ignoring absent values
    pub fn domain<'a>(&self, values: impl IntoIterator<Item = &'a Value>) -> Domain {
        match self {
            ColumnType::Numeric => {
                let (min, max) = values
                    .into_iter()
                    .filter_map(Value::as_f64)
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
                if min > max {
                    Domain::Numeric { min: 0.0, max: 0.0 }
                } else {
                    Domain::Numeric { min, max }
                }
            }
            ColumnType::Categorical => {
                let distinct: BTreeSet<String> = values.into_iter().map(|v| v.to_string()).collect();
                Domain::Categorical(distinct.into_iter().collect())
            }
        }
    }

    /// Default scale bound to `domain`: linear onto `[inner_height, 0]` for
    /// numbers, evenly spaced points onto `[0, inner_height]` for categories.
    ///
    /// The scale follows the domain's shape, so an explicit categorical
    /// domain on a numeric column still gets a point scale.
    pub fn default_scale(&self, domain: &Domain, inner_height: f64) -> Scale {
        match domain {
            Domain::Numeric { min, max } => Scale::linear([*min, *max], [inner_height, 0.0]),
            Domain::Categorical(values) => Scale::point(values.clone(), [0.0, inner_height]),
        }
    }

    /// Whether `value` falls inside `extent` once placed by `dim`'s scale.
    ///
    /// An absent value, or one the scale cannot place, is never within.
    pub fn within(&self, value: Option<&Value>, extent: &BrushExtent, dim: &Dimension) -> bool {
        value
            .and_then(|v| dim.scale.apply(v))
            .map(|offset| extent.contains(offset))
            .unwrap_or(false)
    }
}
