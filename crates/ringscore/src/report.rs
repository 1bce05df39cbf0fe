//! Tab-aligned text form of an [`EvaluationReport`].
//!
//! ```text
//! Schuss:  1      2      ...
//! Wert:    10.98  10.5   ...
//! Teiler:  4.0    125.0  ...
//!
//! Distanzindikator: 125
//! Bester Schuss: 1 (Wert: 10.98 , Teiler: 4.0)
//! ```

use std::fmt;

use crate::scoring::EvaluationReport;

/// Display adapter printing the metrics block for one pane.
pub struct MetricsText<'a>(pub &'a EvaluationReport);

impl fmt::Display for MetricsText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        f.write_str("Schuss:\t")?;
        for s in &report.shots {
            write!(f, "{}\t", s.index)?;
        }
        f.write_str("\nWert:\t")?;
        for s in &report.shots {
            write!(f, "{}\t", Real(s.ring_value))?;
        }
        f.write_str("\nTeiler:\t")?;
        for s in &report.shots {
            write!(f, "{}\t", Real(s.factor))?;
        }
        f.write_str("\n\n")?;

        writeln!(f, "Distanzindikator: {}", report.group_radius_indicator)?;
        match report.best_shot {
            Some(best) => writeln!(
                f,
                "Bester Schuss: {} (Wert: {} , Teiler: {})",
                best.index,
                Real(best.ring_value),
                Real(best.factor)
            ),
            None => writeln!(f, "Bester Schuss: 0 (Wert: 0 , Teiler: 0)"),
        }
    }
}

/// Shortest round-trip decimal, always with a fractional part.
struct Real(f64);

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
