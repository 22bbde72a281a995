//! Report rendering.

use std::fmt::Write as _;

use divvy_core::balance::member_name;
use divvy_core::currency::{format_currency, format_signed};
use divvy_core::{Balance, Member, MemberBalance, MemberSummary};
use divvy_shared::types::Currency;

const SETTLED: &str = "All settled up!";

/// A computed report, ready to render.
#[derive(Debug)]
pub enum Report {
    /// Net balance per member.
    Balances(Vec<MemberBalance>),
    /// Simplified transfers that settle the group.
    SettleUp(Vec<Balance>),
    /// Per-member balance with owes / is owed.
    Summary(Vec<MemberSummary>),
}

impl Report {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Balances(balances) => serde_json::to_string_pretty(balances),
            Self::SettleUp(transfers) => serde_json::to_string_pretty(transfers),
            Self::Summary(summary) => serde_json::to_string_pretty(summary),
        }
    }

    /// Human-readable text.
    pub fn to_text(&self, members: &[Member], currency: Currency) -> String {
        match self {
            Self::Balances(balances) => balances_text(members, balances, currency),
            Self::SettleUp(transfers) => transfers_text(members, transfers, currency),
            Self::Summary(summary) => summary_text(members, summary, currency),
        }
    }
}

fn name_width(members: &[Member]) -> usize {
    members
        .iter()
        .map(|member| member.name.chars().count())
        .max()
        .unwrap_or(0)
}

/// Largest creditor first, ties in member order.
fn balances_text(members: &[Member], balances: &[MemberBalance], currency: Currency) -> String {
    let mut sorted: Vec<&MemberBalance> = balances.iter().collect();
    sorted.sort_by(|a, b| b.balance.cmp(&a.balance));

    let width = name_width(members);
    let mut out = String::new();
    for entry in sorted {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            member_name(members, &entry.member_id),
            format_signed(entry.balance, currency)
        );
    }
    out
}

fn transfer_line(members: &[Member], transfer: &Balance, currency: Currency) -> String {
    format!(
        "{} owes {} {}",
        member_name(members, &transfer.from),
        member_name(members, &transfer.to),
        format_currency(transfer.amount, currency)
    )
}

fn transfers_text(members: &[Member], transfers: &[Balance], currency: Currency) -> String {
    if transfers.is_empty() {
        return format!("{SETTLED}\n");
    }
    transfers
        .iter()
        .map(|transfer| transfer_line(members, transfer, currency) + "\n")
        .collect()
}

fn summary_text(members: &[Member], summary: &[MemberSummary], currency: Currency) -> String {
    let width = name_width(members);
    let mut out = String::new();
    for entry in summary {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            entry.member.name,
            format_signed(entry.balance, currency)
        );
        for transfer in &entry.owes {
            let _ = writeln!(
                out,
                "  pays {} {}",
                member_name(members, &transfer.to),
                format_currency(transfer.amount, currency)
            );
        }
        for transfer in &entry.is_owed {
            let _ = writeln!(
                out,
                "  receives from {} {}",
                member_name(members, &transfer.from),
                format_currency(transfer.amount, currency)
            );
        }
    }
    if summary.iter().all(|entry| entry.owes.is_empty()) {
        out.push_str(SETTLED);
        out.push('\n');
    }
    out
}
