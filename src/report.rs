//! Fixed-width result tables for a calculated cross-section.

use std::io::Write;

use crate::errors::Result;
use crate::math::{CScalar, Scalar};
use crate::section::CrossSection;

const RULE: &str = "______________________________________________________________________";
const BLANK: &str = "|   |                     |        |        |        |        |      |";
const FOOT: &str = "|___|_____________________|________|________|________|________|______|";

struct Row<'a> {
    label: String,
    name: &'a str,
    z: CScalar,
    /// Susceptance in µS.
    b: Scalar,
}

impl Row<'_> {
    fn write<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(
            w,
            "|{:^3}|{:^21}|{:^8.4}|{:^8.4}|{:^8.4}|{:^8.4}|{:^6.1}|",
            self.label,
            self.name,
            self.z.re,
            self.z.im,
            self.z.norm(),
            self.b,
            self.z.arg().to_degrees()
        )?;
        Ok(())
    }
}

fn write_header<W: Write>(w: &mut W, title: &str, suffix: char) -> Result<()> {
    writeln!(w, "{title}")?;
    writeln!(w, "{RULE}")?;
    writeln!(w, "{BLANK}")?;
    writeln!(
        w,
        "| № |{:^21}|{:^8}|{:^8}|{:^8}|{:^8}|{:^6}|",
        "Name",
        format!("R{suffix}"),
        format!("X{suffix}"),
        format!("Z{suffix}"),
        format!("B{suffix}"),
        "fi"
    )?;
    writeln!(w, "{FOOT}")?;
    Ok(())
}

/// Writes positive- and zero-sequence tables for `section`.
///
/// Impedances are in Ω, susceptances in µS, angles in degrees, all over the full
/// section length. Each zero-sequence row is followed by `/k` rows giving the
/// coupling with every later main branch `k`.
pub fn write_report<W: Write>(mut w: W, section: &CrossSection) -> Result<()> {
    section.results()?;
    let cfg = section.config();
    writeln!(
        w,
        "Section {}: L = {}; Rz = {}; Dz = {};",
        section.name(),
        cfg.length,
        cfg.ground_resistance,
        cfg.ground_depth
    )?;

    write_header(&mut w, "Positive sequence", '1')?;
    for (id, branch) in section.main_branches() {
        writeln!(w, "{BLANK}")?;
        Row {
            label: sequence_label(branch.sequence_number()),
            name: branch.name(),
            z: section.z1(id)?,
            b: 1.0e6 * section.b1(id)?.im,
        }
        .write(&mut w)?;
    }
    writeln!(w, "{FOOT}")?;
    writeln!(w)?;

    write_header(&mut w, "Zero sequence", '0')?;
    let main: Vec<_> = section.main_branches().collect();
    for (k, (id, branch)) in main.iter().enumerate() {
        writeln!(w, "{BLANK}")?;
        Row {
            label: sequence_label(branch.sequence_number()),
            name: branch.name(),
            z: section.z0(*id)?,
            b: 1.0e6 * section.b0(*id)?.im,
        }
        .write(&mut w)?;
        for (other, coupled) in &main[k + 1..] {
            Row {
                label: format!("/{}", sequence_label(coupled.sequence_number())),
                name: coupled.name(),
                z: section.mutual_z0(*id, *other)?,
                b: 1.0e6 * section.mutual_b0(*id, *other)?.im,
            }
            .write(&mut w)?;
        }
    }
    writeln!(w, "{FOOT}")?;
    writeln!(w)?;
    Ok(())
}

fn sequence_label(sequence: Option<usize>) -> String {
    sequence.map_or_else(String::new, |n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AttachmentPoints, ConductorType};
    use crate::config::SectionConfig;
    use crate::errors::LineParamsError;
    use crate::section::BranchSpec;

    fn section() -> CrossSection {
        let conductor = ConductorType::new("AC-240/32", 0.118, 21.6).unwrap();
        let mut section = CrossSection::new("S1", SectionConfig::default().with_length(25.0));
        for (name, x) in [("L1", 0.0), ("L2", 20.0)] {
            let points = AttachmentPoints::Phases([
                CScalar::new(x - 4.0, 20.0),
                CScalar::new(x, 20.0),
                CScalar::new(x + 4.0, 20.0),
            ]);
            section.add_branch(BranchSpec::new(name, points, &conductor)).unwrap();
        }
        section
    }

    #[test]
    fn report_requires_calc() {
        let mut out = Vec::new();
        assert!(matches!(
            write_report(&mut out, &section()),
            Err(LineParamsError::NotCalculated(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn report_lists_branches_and_coupling() {
        let mut s = section();
        s.calc().unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &s).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Section S1: L = 25;"));
        assert!(text.contains("Positive sequence"));
        assert!(text.contains("Zero sequence"));
        assert!(text.contains("|/2 |"), "missing coupling row:\n{text}");
        assert_eq!(text.matches("L2").count(), 3);
    }
}
