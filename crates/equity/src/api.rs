// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! JSON odds requests and responses.
use serde::{Deserialize, Serialize};

use showdown_eval::HandRank;

use crate::{EquityConfig, EquityError, Table, calculate};

/// An odds request, `{"players": ["AsAh", "KsKh"], "board": "2c7dTh"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsRequest {
    /// The players hole cards.
    pub players: Vec<String>,
    /// The board cards, a missing or null board is the preflop.
    #[serde(default)]
    pub board: Option<String>,
}

/// An odds response with one entry per player in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsResponse {
    /// The players odds.
    pub equities: Vec<PlayerOdds>,
    /// Set if the calculation timed out.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
}

/// A player odds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerOdds {
    /// Expected share of the pot.
    pub equity: f64,
    /// Fraction of outright wins.
    pub win: f64,
    /// Fraction of split pots.
    pub tie: f64,
    /// The player made hand from the flop on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<HandRank>,
}

/// An error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// The error message.
    pub error: String,
}

impl From<&EquityError> for ErrorResponse {
    fn from(err: &EquityError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Validates a request and computes the players odds.
pub fn compute_equities(
    request: &OddsRequest,
    config: &EquityConfig,
) -> Result<OddsResponse, EquityError> {
    let board = request.board.as_deref().unwrap_or_default();
    let table = Table::parse(request.players.as_slice(), board)?;
    let result = calculate(&table, config)?;

    let equities = result
        .players
        .iter()
        .map(|p| PlayerOdds {
            equity: p.equity,
            win: p.win(),
            tie: p.tie(),
            hand: p.hand,
        })
        .collect();

    Ok(OddsResponse {
        equities,
        partial: result.partial,
    })
}

/// The outcome of a JSON request.
#[derive(Debug)]
pub enum Reply {
    /// The odds response JSON.
    Odds(String),
    /// The error response JSON for an invalid request.
    Invalid(String),
}

/// Handles a JSON odds request.
///
/// Malformed JSON and validation errors are returned as an error response,
/// an invariant violation is returned as an error.
pub fn handle_json(input: &str, config: &EquityConfig, pretty: bool) -> Result<Reply, EquityError> {
    let request = match serde_json::from_str::<OddsRequest>(input) {
        Ok(request) => request,
        Err(e) => {
            let response = ErrorResponse {
                error: format!("Invalid request: {e}"),
            };
            return to_json(&response, pretty).map(Reply::Invalid);
        }
    };

    match compute_equities(&request, config) {
        Ok(response) => to_json(&response, pretty).map(Reply::Odds),
        Err(e) if e.is_validation() => to_json(&ErrorResponse::from(&e), pretty).map(Reply::Invalid),
        Err(e) => Err(e),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, EquityError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    json.map_err(|e| EquityError::InvariantViolation(format!("JSON encoding failed: {e}")))
}
