//! Cross-section assembly and shield-wire elimination.
//!
//! A cross-section owns its branches and sorts them into three lists as they are
//! attached:
//!
//! - the main list (three-phase circuits and standalone shield wires), which sizes
//!   the result matrices;
//! - shield wires grounded at both ends, eliminated from the impedance matrix;
//! - shield wires grounded at one or both ends, eliminated from the potential
//!   coefficient matrix.
//!
//! [`CrossSection::calc`] assembles the zero-sequence matrices, folds the grounded
//! shield wires into the main branches by Kron reduction and inverts the potential
//! coefficients into susceptances.

use tracing::{debug, info, info_span};

use crate::config::SectionConfig;
use crate::constants::angular_frequency;
use crate::errors::{LineParamsError, Result};
use crate::math::{kron_reduce, CMatrix, CScalar, CVector, RMatrix, RVector, Scalar, J};

use super::branch::{Branch, BranchSpec, GroundReturn, ShieldGrounding};
use super::mutual::{mutual_impedance, mutual_potential};

/// Handle to a branch attached to a [`CrossSection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(usize);

impl BranchId {
    /// Attachment order within the section (0-based, across all branch kinds).
    #[must_use]
    pub fn position(self) -> usize {
        self.0
    }
}

/// Per-kilometre results of a cross-section calculation, indexed by main-list position.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionResults {
    z1: CVector,
    z0: CMatrix,
    b1: CVector,
    b0: CMatrix,
}

impl SectionResults {
    /// Positive-sequence self impedances (Ω/km).
    #[must_use]
    pub fn z1(&self) -> &CVector {
        &self.z1
    }

    /// Zero-sequence impedance matrix after shield elimination (Ω/km).
    #[must_use]
    pub fn z0(&self) -> &CMatrix {
        &self.z0
    }

    /// Positive-sequence susceptances (S/km).
    #[must_use]
    pub fn b1(&self) -> &CVector {
        &self.b1
    }

    /// Zero-sequence susceptance matrix after shield elimination (S/km).
    #[must_use]
    pub fn b0(&self) -> &CMatrix {
        &self.b0
    }

    /// Number of main branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.z1.len()
    }

    /// True when the section has no main branches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.z1.is_empty()
    }
}

/// Cross-section of parallel circuits and shield wires sharing a ground return.
#[derive(Debug, Clone)]
pub struct CrossSection {
    name: String,
    config: SectionConfig,
    ground: GroundReturn,
    branches: Vec<Branch>,
    main: Vec<usize>,
    z_shields: Vec<usize>,
    b_shields: Vec<usize>,
    results: Option<SectionResults>,
}

impl CrossSection {
    /// Creates an empty cross-section.
    #[must_use]
    pub fn new(name: impl Into<String>, config: SectionConfig) -> Self {
        Self {
            name: name.into(),
            ground: GroundReturn::new(&config),
            config,
            branches: Vec::new(),
            main: Vec::new(),
            z_shields: Vec::new(),
            b_shields: Vec::new(),
            results: None,
        }
    }

    /// Builds the branch described by `spec`, computes its self terms and files it
    /// into the main or elimination lists according to its grounding.
    ///
    /// Attaching a branch discards results of a previous [`calc`](Self::calc).
    pub fn add_branch(&mut self, spec: BranchSpec) -> Result<BranchId> {
        let mut branch = Branch::new(spec, &self.ground)?;
        let position = self.branches.len();
        match branch.grounding() {
            ShieldGrounding::Standalone => {
                branch.set_main_index(self.main.len());
                self.main.push(position);
            }
            ShieldGrounding::OneEnd => self.b_shields.push(position),
            ShieldGrounding::BothEnds => {
                self.z_shields.push(position);
                self.b_shields.push(position);
            }
        }
        debug!(
            section = %self.name,
            branch = %branch.name(),
            kind = ?branch.kind(),
            grounding = %branch.grounding(),
            sequence = ?branch.sequence_number(),
            "branch attached"
        );
        self.branches.push(branch);
        self.results = None;
        Ok(BranchId(position))
    }

    /// Records the fault-network nodes `q1`, `q2` that branch `id` connects.
    pub fn connect(&mut self, id: BranchId, q1: usize, q2: usize) -> Result<()> {
        self.branches
            .get_mut(id.0)
            .ok_or(LineParamsError::UnknownBranch(id.0))?
            .set_nodes(q1, q2);
        Ok(())
    }

    /// Runs the assembly and reduction. Repeated calls give identical results.
    pub fn calc(&mut self) -> Result<&SectionResults> {
        let _span = info_span!(
            "section_calc",
            section = %self.name,
            main = self.main.len(),
            z_shields = self.z_shields.len(),
            b_shields = self.b_shields.len()
        )
        .entered();

        let results = self.assemble()?;
        info!(branches = results.len(), "cross-section calculated");
        Ok(self.results.insert(results))
    }

    fn assemble(&self) -> Result<SectionResults> {
        let main: Vec<&Branch> = self.main.iter().map(|&i| &self.branches[i]).collect();
        let n = main.len();

        let z1 = CVector::from_iterator(n, main.iter().map(|b| b.self_terms().z1));
        let a1 = RVector::from_iterator(n, main.iter().map(|b| b.self_terms().a1));
        let mut z0 = CMatrix::zeros(n, n);
        let mut a0 = RMatrix::zeros(n, n);
        for (i, pk) in main.iter().enumerate() {
            z0[(i, i)] = pk.self_terms().z0;
            a0[(i, i)] = pk.self_terms().a0;
            for (j, pk2) in main.iter().enumerate().take(i) {
                let m0 = mutual_impedance(pk, pk2, &self.ground)?;
                z0[(i, j)] = m0;
                z0[(j, i)] = m0;
                let am = mutual_potential(pk, pk2)?;
                a0[(i, j)] = am;
                a0[(j, i)] = am;
            }
        }

        if !self.z_shields.is_empty() {
            z0 = self.eliminate_impedance(&main, &z0)?;
        }
        if !self.b_shields.is_empty() {
            a0 = self.eliminate_potential(&main, &a0)?;
        }

        let jw = J * angular_frequency(self.config.frequency_hz);
        if let Some(value) = a1.iter().copied().find(|a| *a == 0.0 || !a.is_finite()) {
            return Err(LineParamsError::Domain {
                quantity: "positive-sequence potential coefficient",
                value,
            });
        }
        let b1 = a1.map(|a| jw / a);
        let b0 = a0
            .try_inverse()
            .ok_or(LineParamsError::SingularMatrix("zero-sequence potential coefficients"))?
            .map(|a| jw * a);

        Ok(SectionResults { z1, z0, b1, b0 })
    }

    /// `Z0 − Zpt · Ztt⁻¹ · Ztp` over shield wires grounded at both ends.
    fn eliminate_impedance(&self, main: &[&Branch], z0: &CMatrix) -> Result<CMatrix> {
        let shields: Vec<&Branch> = self.z_shields.iter().map(|&i| &self.branches[i]).collect();
        let (n, nt) = (main.len(), shields.len());
        let mut ztt = CMatrix::zeros(nt, nt);
        let mut zpt = CMatrix::zeros(n, nt);
        let mut ztp = CMatrix::zeros(nt, n);
        for (i, pk) in shields.iter().enumerate() {
            ztt[(i, i)] = pk.self_terms().z0;
            for (j, pk2) in shields.iter().enumerate().take(i) {
                let m0 = mutual_impedance(pk, pk2, &self.ground)?;
                ztt[(i, j)] = m0;
                ztt[(j, i)] = m0;
            }
            for (j, pk2) in main.iter().enumerate() {
                let m0 = mutual_impedance(pk, pk2, &self.ground)?;
                ztp[(i, j)] = m0;
                zpt[(j, i)] = m0;
            }
        }
        debug!(main = n, eliminated = nt, "reducing zero-sequence impedance");
        kron_reduce(z0, &zpt, &ztt, &ztp).ok_or(LineParamsError::SingularMatrix("shield-wire impedances"))
    }

    /// `A0 − Apt · Att⁻¹ · Atp` over shield wires grounded at one or both ends.
    ///
    /// `Atp` carries the main branch's conductor count, `Apt` does not.
    fn eliminate_potential(&self, main: &[&Branch], a0: &RMatrix) -> Result<RMatrix> {
        let shields: Vec<&Branch> = self.b_shields.iter().map(|&i| &self.branches[i]).collect();
        let (n, nt) = (main.len(), shields.len());
        let mut att = RMatrix::zeros(nt, nt);
        let mut apt = RMatrix::zeros(n, nt);
        let mut atp = RMatrix::zeros(nt, n);
        for (i, pk) in shields.iter().enumerate() {
            att[(i, i)] = pk.self_terms().a0;
            for (j, pk2) in shields.iter().enumerate().take(i) {
                let am = mutual_potential(pk, pk2)?;
                att[(i, j)] = am;
                att[(j, i)] = am;
            }
            for (j, pk2) in main.iter().enumerate() {
                let am = mutual_potential(pk, pk2)?;
                atp[(i, j)] = pk2.conductor_count() as Scalar * am;
                apt[(j, i)] = am;
            }
        }
        debug!(main = n, eliminated = nt, "reducing zero-sequence potential coefficients");
        kron_reduce(a0, &apt, &att, &atp).ok_or(LineParamsError::SingularMatrix("shield-wire potential coefficients"))
    }

    /// Section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calculation settings.
    #[must_use]
    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    /// Section length (km).
    #[must_use]
    pub fn length(&self) -> Scalar {
        self.config.length
    }

    /// Branch behind `id`.
    pub fn branch(&self, id: BranchId) -> Result<&Branch> {
        self.branches.get(id.0).ok_or(LineParamsError::UnknownBranch(id.0))
    }

    /// All branches in attachment order.
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    /// Main-list branches in sequence order, with their handles.
    pub fn main_branches(&self) -> impl Iterator<Item = (BranchId, &Branch)> {
        self.main.iter().map(move |&i| (BranchId(i), &self.branches[i]))
    }

    /// Number of main branches (dimension of the result matrices).
    #[must_use]
    pub fn main_len(&self) -> usize {
        self.main.len()
    }

    /// Per-kilometre result matrices of the last [`calc`](Self::calc).
    pub fn results(&self) -> Result<&SectionResults> {
        self.results
            .as_ref()
            .ok_or_else(|| LineParamsError::NotCalculated(self.name.clone()))
    }

    fn main_index(&self, id: BranchId) -> Result<usize> {
        let branch = self.branch(id)?;
        branch
            .main_index()
            .ok_or_else(|| LineParamsError::NotInReducedSystem(branch.name().to_owned()))
    }

    fn indexed(&self, id: BranchId) -> Result<(&SectionResults, usize)> {
        let idx = self.main_index(id)?;
        Ok((self.results()?, idx))
    }

    /// Positive-sequence impedance of the branch over the section length (Ω).
    pub fn z1(&self, id: BranchId) -> Result<CScalar> {
        let (r, i) = self.indexed(id)?;
        Ok(self.length() * r.z1[i])
    }

    /// Zero-sequence impedance of the branch over the section length (Ω).
    pub fn z0(&self, id: BranchId) -> Result<CScalar> {
        let (r, i) = self.indexed(id)?;
        Ok(self.length() * r.z0[(i, i)])
    }

    /// Positive-sequence susceptance of the branch over the section length (S).
    pub fn b1(&self, id: BranchId) -> Result<CScalar> {
        let (r, i) = self.indexed(id)?;
        Ok(self.length() * r.b1[i])
    }

    /// Zero-sequence susceptance of the branch over the section length (S).
    pub fn b0(&self, id: BranchId) -> Result<CScalar> {
        let (r, i) = self.indexed(id)?;
        Ok(self.length() * r.b0[(i, i)])
    }

    /// Zero-sequence mutual impedance between two main branches (Ω).
    pub fn mutual_z0(&self, a: BranchId, b: BranchId) -> Result<CScalar> {
        let (r, i) = self.indexed(a)?;
        let j = self.main_index(b)?;
        Ok(self.length() * r.z0[(i, j)])
    }

    /// Zero-sequence mutual susceptance between two main branches (S).
    pub fn mutual_b0(&self, a: BranchId, b: BranchId) -> Result<CScalar> {
        let (r, i) = self.indexed(a)?;
        let j = self.main_index(b)?;
        Ok(self.length() * r.b0[(i, j)])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::{AttachmentPoints, ConductorType};

    fn flat(x: Scalar) -> AttachmentPoints {
        AttachmentPoints::Phases([
            CScalar::new(x - 4.0, 20.0),
            CScalar::new(x, 20.0),
            CScalar::new(x + 4.0, 20.0),
        ])
    }

    fn conductor() -> ConductorType {
        ConductorType::new("AC-240/32", 0.118, 21.6).unwrap()
    }

    fn wire() -> ConductorType {
        ConductorType::steel_wire("S-70", 2.5, 0.29, 11.0).unwrap()
    }

    #[test]
    fn single_circuit_has_no_reduction() {
        let mut section = CrossSection::new("S1", SectionConfig::default().with_length(10.0));
        let id = section.add_branch(BranchSpec::new("L1", flat(0.0), &conductor())).unwrap();
        section.calc().unwrap();
        let terms = *section.branch(id).unwrap().self_terms();
        let results = section.results().unwrap();
        assert_eq!(results.z0().shape(), (1, 1));
        assert_eq!(results.z0()[(0, 0)], terms.z0);
        let omega = angular_frequency(50.0);
        assert_relative_eq!(results.b0()[(0, 0)].im, omega / terms.a0, max_relative = 1.0e-12);
        assert_relative_eq!(results.b1()[0].im, omega / terms.a1, max_relative = 1.0e-12);
        assert_relative_eq!(section.z1(id).unwrap().re, 10.0 * terms.z1.re, max_relative = 1.0e-12);
    }

    #[test]
    fn results_require_calc() {
        let mut section = CrossSection::new("S1", SectionConfig::default());
        let id = section.add_branch(BranchSpec::new("L1", flat(0.0), &conductor())).unwrap();
        assert!(matches!(section.z0(id), Err(LineParamsError::NotCalculated(_))));
        section.calc().unwrap();
        assert!(section.z0(id).is_ok());
        section.add_branch(BranchSpec::new("L2", flat(20.0), &conductor())).unwrap();
        assert!(matches!(section.results(), Err(LineParamsError::NotCalculated(_))));
    }

    #[test]
    fn grounded_shield_has_no_results() {
        let mut section = CrossSection::new("S1", SectionConfig::default());
        section.add_branch(BranchSpec::new("L1", flat(0.0), &conductor())).unwrap();
        let shield = section
            .add_branch(
                BranchSpec::new("T1", AttachmentPoints::Shield(CScalar::new(0.0, 27.0)), &wire())
                    .grounding(ShieldGrounding::BothEnds),
            )
            .unwrap();
        section.calc().unwrap();
        assert!(matches!(section.z1(shield), Err(LineParamsError::NotInReducedSystem(_))));
        assert_eq!(section.branch(shield).unwrap().sequence_number(), None);
    }

    #[test]
    fn one_end_grounding_only_changes_susceptance() {
        let build = |grounding: Option<ShieldGrounding>| {
            let mut section = CrossSection::new("S1", SectionConfig::default());
            let id = section.add_branch(BranchSpec::new("L1", flat(0.0), &conductor())).unwrap();
            if let Some(grounding) = grounding {
                section
                    .add_branch(
                        BranchSpec::new("T1", AttachmentPoints::Shield(CScalar::new(0.0, 27.0)), &wire())
                            .grounding(grounding),
                    )
                    .unwrap();
            }
            section.calc().unwrap();
            (section.z0(id).unwrap(), section.b0(id).unwrap())
        };
        let (z_bare, b_bare) = build(None);
        let (z_one, b_one) = build(Some(ShieldGrounding::OneEnd));
        let (z_both, b_both) = build(Some(ShieldGrounding::BothEnds));
        assert_eq!(z_bare, z_one);
        assert_ne!(z_bare, z_both);
        assert_ne!(b_bare, b_one);
        assert_relative_eq!(b_one.im, b_both.im, max_relative = 1.0e-12);
        // A grounded shield pulls zero-sequence reactance down.
        assert!(z_both.im < z_bare.im);
    }

    #[test]
    fn connect_records_nodes() {
        let mut section = CrossSection::new("S1", SectionConfig::default());
        let id = section.add_branch(BranchSpec::new("L1", flat(0.0), &conductor())).unwrap();
        section.connect(id, 3, 7).unwrap();
        assert_eq!(section.branch(id).unwrap().nodes(), Some((3, 7)));
        assert!(matches!(section.connect(BranchId(9), 1, 2), Err(LineParamsError::UnknownBranch(9))));
    }

    #[test]
    fn empty_section_calculates_to_empty_results() {
        let mut section = CrossSection::new("empty", SectionConfig::default());
        let results = section.calc().unwrap();
        assert!(results.is_empty());
        assert_eq!(results.z0().shape(), (0, 0));
    }
}
