//! Human readable console tables.

use exposure::{
    validate::{DistanceReport, OrderingReport},
    CompassDirection, ExposureSignature, ScoreModel,
};
use std::io::{self, Write};

pub fn distances(out: &mut impl Write, reports: &[DistanceReport]) -> io::Result<()> {
    writeln!(out, "Port distance checks")?;
    writeln!(
        out,
        "  {:<16} {:<16} {:>9} {:>9} {:>13}  result",
        "origin", "destination", "km", "expected", "window"
    )?;
    for report in reports {
        let check = &report.check;
        let expected = check
            .expected_km
            .map_or_else(|| "-".to_owned(), |km| format!("{km:.1}"));
        writeln!(
            out,
            "  {:<16} {:<16} {:>9.2} {:>9} {:>13}  {}",
            check.origin,
            check.destination,
            report.distance_km,
            expected,
            format!("[{:.0}, {:.0}]", check.min_km, check.max_km),
            if report.passed() { "PASS" } else { "FAIL" }
        )?;
    }
    writeln!(out)
}

pub fn signatures(
    out: &mut impl Write,
    model: &ScoreModel,
    signatures: &[ExposureSignature],
) -> io::Result<()> {
    let (score_label, aggregate_label) = match model {
        ScoreModel::LogFetch => ("exposure", "avg exposure"),
        ScoreModel::ShelterThreshold { .. } => ("shelter ratio", "mean shelter ratio"),
    };
    for sig in signatures {
        writeln!(
            out,
            "{} ({} -> {})",
            sig.route_id, sig.origin, sig.destination
        )?;
        let top: Vec<&str> = sig.top.iter().map(|dir| dir.name()).collect();
        writeln!(
            out,
            "  {aggregate_label}: {:.3}, top: {}",
            sig.aggregate,
            top.join(", ")
        )?;
        for row in CompassDirection::ALL.chunks(8) {
            write!(out, "  {:<14}", "")?;
            for dir in row {
                write!(out, " {:>6}", dir.name())?;
            }
            writeln!(out)?;
            write!(out, "  {score_label:<14}")?;
            for dir in row {
                write!(out, " {:>6.2}", sig.scores[*dir])?;
            }
            writeln!(out)?;
            write!(out, "  {:<14}", "open km")?;
            for dir in row {
                write!(out, " {:>6.1}", sig.distances_km[*dir])?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn ordering(out: &mut impl Write, report: &OrderingReport) -> io::Result<()> {
    let check = &report.check;
    writeln!(out, "Ordering check")?;
    writeln!(
        out,
        "  {:<16} {:.3}",
        check.more_exposed, report.more_exposed_score
    )?;
    writeln!(
        out,
        "  {:<16} {:.3}",
        check.less_exposed, report.less_exposed_score
    )?;
    writeln!(
        out,
        "  difference {:+.3} (margin {:.3}): {}",
        report.difference(),
        check.min_margin,
        if report.passed() { "PASS" } else { "FAIL" }
    )?;
    writeln!(out)
}
