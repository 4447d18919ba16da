//! Career-wide batting milestones: conversion rates and how the player gets out.

use crate::cli::types::DismissalType;
use crate::engine::derive::{percentage, FIFTY, HUNDRED};
use crate::engine::types::PerformanceRecord;
use serde::{Deserialize, Serialize};

/// Runs that count as "getting a start".
pub const START: u32 = 20;
pub const THIRTY: u32 = 30;

/// How often an innings that reached one threshold went on to the next.
/// An innings reaches every threshold at or below its score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRates {
    pub starts: u32,
    pub thirties: u32,
    pub fifties_plus: u32,
    pub hundreds: u32,
    pub start_to_thirty: Option<f64>,
    pub thirty_to_fifty: Option<f64>,
    pub fifty_to_hundred: Option<f64>,
}

pub fn conversion_rates(records: &[PerformanceRecord]) -> ConversionRates {
    let mut rates = ConversionRates::default();
    for entry in records.iter().flat_map(|r| r.performance.innings.batted()) {
        rates.starts += u32::from(entry.runs >= START);
        rates.thirties += u32::from(entry.runs >= THIRTY);
        rates.fifties_plus += u32::from(entry.runs >= FIFTY);
        rates.hundreds += u32::from(entry.runs >= HUNDRED);
    }
    rates.start_to_thirty = percentage(rates.thirties as f64, rates.starts as f64);
    rates.thirty_to_fifty = percentage(rates.fifties_plus as f64, rates.thirties as f64);
    rates.fifty_to_hundred = percentage(rates.hundreds as f64, rates.fifties_plus as f64);
    rates
}

/// Batted innings counted by how they ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DismissalTypeHistogram {
    pub caught: u32,
    pub bowled: u32,
    pub lbw: u32,
    pub run_out: u32,
    pub stumped: u32,
    pub hit_wicket: u32,
    pub not_out: u32,
    pub retired_hurt: u32,
}

impl DismissalTypeHistogram {
    pub fn get(&self, kind: DismissalType) -> u32 {
        match kind {
            DismissalType::Caught => self.caught,
            DismissalType::Bowled => self.bowled,
            DismissalType::Lbw => self.lbw,
            DismissalType::RunOut => self.run_out,
            DismissalType::Stumped => self.stumped,
            DismissalType::HitWicket => self.hit_wicket,
            DismissalType::NotOut => self.not_out,
            DismissalType::RetiredHurt => self.retired_hurt,
        }
    }

    fn bump(&mut self, kind: DismissalType) {
        let slot = match kind {
            DismissalType::Caught => &mut self.caught,
            DismissalType::Bowled => &mut self.bowled,
            DismissalType::Lbw => &mut self.lbw,
            DismissalType::RunOut => &mut self.run_out,
            DismissalType::Stumped => &mut self.stumped,
            DismissalType::HitWicket => &mut self.hit_wicket,
            DismissalType::NotOut => &mut self.not_out,
            DismissalType::RetiredHurt => &mut self.retired_hurt,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u32 {
        DismissalType::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

pub fn dismissal_histogram(records: &[PerformanceRecord]) -> DismissalTypeHistogram {
    let mut histogram = DismissalTypeHistogram::default();
    for entry in records.iter().flat_map(|r| r.performance.innings.batted()) {
        if let Some(kind) = entry.dismissal_type {
            histogram.bump(kind);
        }
    }
    histogram
}
