//! Settlement facade.
//!
//! Resolve a table, decode its round once, then match every open bet against the decoded
//! outcome. Callers own persistence; nothing here keeps state between calls.

use serde::Serialize;
use tablebook_types::{Family, HistoryEntry, Outcome, PlacedBet, RawRoundEvent};
use thiserror::Error;
use tracing::{debug, field, info_span, warn, Span};

use crate::casino::{Table, TableRegistry};

/// Why a round could not be settled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettleError {
    /// No family is routed for this table. The round is unsupported.
    #[error("unknown table: {table_id}")]
    UnknownTable { table_id: String },
    /// The round's raw fields are incomplete or malformed. Retry once the provider
    /// publishes a full result.
    #[error("round {round_id:?} on table {table_id} is not settleable yet")]
    Undecodable {
        table_id: String,
        round_id: Option<String>,
    },
}

impl SettleError {
    /// Whether the caller should retry the round later instead of escalating it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Undecodable { .. })
    }
}

/// Verdict for one bet, in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_id: Option<String>,
    pub won: bool,
}

/// Decoded outcome and per-bet verdicts for one round.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundSettlement {
    pub family: Family,
    pub outcome: Outcome,
    pub verdicts: Vec<Verdict>,
}

impl RoundSettlement {
    pub fn winners(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|verdict| verdict.won)
    }

    pub fn won_count(&self) -> usize {
        self.winners().count()
    }
}

fn resolve<'a>(registry: &'a TableRegistry, table_id: &str) -> Result<Table<'a>, SettleError> {
    registry.resolve(table_id).ok_or_else(|| {
        warn!(table_id, "no family routed for table");
        SettleError::UnknownTable {
            table_id: table_id.to_string(),
        }
    })
}

fn decode(table: &Table<'_>, event: &RawRoundEvent) -> Result<Outcome, SettleError> {
    table.decode(event).ok_or_else(|| {
        debug!(?event, "round did not decode");
        SettleError::Undecodable {
            table_id: event.table_id.clone(),
            round_id: event.round_id().map(|mid| mid.as_text().into_owned()),
        }
    })
}

fn verdict(table: &Table<'_>, outcome: &Outcome, index: usize, bet: &PlacedBet) -> Verdict {
    Verdict {
        index,
        bet_id: bet.id.clone(),
        won: table.matches(bet, outcome),
    }
}

/// The `family` field is recorded once the table resolves.
fn round_span(event: &RawRoundEvent) -> Span {
    let round_id = event.round_id().map(|mid| mid.as_text().into_owned());
    info_span!(
        "settle_round",
        table_id = %event.table_id,
        family = field::Empty,
        round_id = ?round_id
    )
}

fn prepare<'a>(
    registry: &'a TableRegistry,
    event: &RawRoundEvent,
    span: &Span,
) -> Result<(Table<'a>, Outcome), SettleError> {
    let table = resolve(registry, &event.table_id)?;
    span.record("family", field::display(table.family()));
    let outcome = decode(&table, event)?;
    Ok((table, outcome))
}

fn finish(table: &Table<'_>, outcome: Outcome, verdicts: Vec<Verdict>) -> RoundSettlement {
    let settlement = RoundSettlement {
        family: table.family(),
        outcome,
        verdicts,
    };
    debug!(
        bets = settlement.verdicts.len(),
        winners = settlement.won_count(),
        "round settled"
    );
    settlement
}

/// Settle every bet of one round.
pub fn settle_round(
    registry: &TableRegistry,
    event: &RawRoundEvent,
    bets: &[PlacedBet],
) -> Result<RoundSettlement, SettleError> {
    let span = round_span(event);
    let _guard = span.enter();

    let (table, outcome) = prepare(registry, event, &span)?;
    let verdicts = bets
        .iter()
        .enumerate()
        .map(|(index, bet)| verdict(&table, &outcome, index, bet))
        .collect();
    Ok(finish(&table, outcome, verdicts))
}

/// Same verdicts as [`settle_round`], with bets matched on `pool`.
#[cfg(feature = "parallel")]
pub fn settle_round_parallel(
    registry: &TableRegistry,
    event: &RawRoundEvent,
    bets: &[PlacedBet],
    pool: &rayon::ThreadPool,
) -> Result<RoundSettlement, SettleError> {
    use rayon::prelude::*;

    let span = round_span(event);
    let _guard = span.enter();

    let (table, outcome) = prepare(registry, event, &span)?;
    let verdicts = pool.install(|| {
        bets.par_iter()
            .enumerate()
            .map(|(index, bet)| verdict(&table, &outcome, index, bet))
            .collect()
    });
    Ok(finish(&table, outcome, verdicts))
}

/// History strip for a table. Undecodable rows keep their position.
pub fn format_history(
    registry: &TableRegistry,
    table_id: &str,
    events: &[RawRoundEvent],
) -> Result<Vec<HistoryEntry>, SettleError> {
    let span = info_span!("format_history", table_id, rows = events.len());
    let _guard = span.enter();
    Ok(resolve(registry, table_id)?.history(events))
}
