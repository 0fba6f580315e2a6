//! Report

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{items::KnapsackItem, knapsack::Knapsack, solution::Solution};

/// Errors that can occur when building or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The solution does not have one quantity per knapsack item.
    #[error("Solution has {quantities} quantities, but knapsack has {items} items")]
    QuantityMismatch {
        /// Number of items in the knapsack
        items: usize,

        /// Number of quantities in the solution
        quantities: usize,
    },

    /// IO error
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Human-readable view of a solution next to the knapsack it was solved for.
#[derive(Debug)]
pub struct Report<'a, I> {
    knapsack: &'a Knapsack<I>,
    solution: &'a Solution,
}

impl<'a, I: KnapsackItem> Report<'a, I> {
    /// Create a report for `solution`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError::QuantityMismatch`] if the solution was not solved for `knapsack`.
    pub fn new(knapsack: &'a Knapsack<I>, solution: &'a Solution) -> Result<Self, ReportError> {
        if knapsack.len() != solution.quantities().len() {
            return Err(ReportError::QuantityMismatch {
                items: knapsack.len(),
                quantities: solution.quantities().len(),
            });
        }

        Ok(Report { knapsack, solution })
    }

    /// Write the taken items and totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.solution.taken().next().is_some() {
            let table = self.table();

            writeln!(out, "Taking:\n{table}")?;
        }

        writeln!(out, "Total value: {}", self.solution.value())?;
        writeln!(
            out,
            "Total weight: {} / {}",
            self.solution.weight(),
            self.knapsack.capacity()
        )?;

        Ok(())
    }

    fn table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Quantity", "Weight", "Value"]);

        for (index, units) in self.solution.taken() {
            let Some(item) = self.knapsack.items().get(index) else {
                continue;
            };

            let quantity = match item.pieces() {
                Some(pieces) => format!("{units}/{pieces}"),
                None => units.to_string(),
            };

            builder.push_record([
                format!("#{:<3}", index + 1),
                item.name().to_string(),
                quantity,
                units.saturating_mul(item.weight()).to_string(),
                units.saturating_mul(item.value()).to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(2..5), Alignment::right());

        table.to_string()
    }
}
