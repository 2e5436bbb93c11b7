//! Three-phase circuits and shield wires within a cross-section.

use std::fmt;

use crate::catalog::{AttachmentPoints, ConductorType, InsulatorString};
use crate::config::SectionConfig;
use crate::constants::{reactance_coefficient, POTENTIAL_COEFFICIENT};
use crate::errors::{LineParamsError, Result};
use crate::math::{geometric_mean, ln_ratio, CScalar, Scalar, J};

/// How a shield wire is grounded, which decides how it enters the reduction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShieldGrounding {
    /// Kept in the main system like a separate line (code 0).
    #[default]
    Standalone,
    /// Grounded at one end: eliminated from the potential coefficients only (code 1).
    OneEnd,
    /// Grounded at both ends: eliminated from impedances and potential coefficients (code 2).
    BothEnds,
}

impl TryFrom<u8> for ShieldGrounding {
    type Error = LineParamsError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Standalone),
            1 => Ok(Self::OneEnd),
            2 => Ok(Self::BothEnds),
            other => Err(LineParamsError::InvalidParameter(format!(
                "grounding mode must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

impl fmt::Display for ShieldGrounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Standalone => 0,
            Self::OneEnd => 1,
            Self::BothEnds => 2,
        };
        write!(f, "{code}")
    }
}

/// Three-phase circuit or single shield wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// Three phase conductors.
    ThreePhase,
    /// One shield wire.
    ShieldWire,
}

impl BranchKind {
    /// Number of conductors represented by the branch.
    #[must_use]
    pub fn conductor_count(self) -> usize {
        match self {
            Self::ThreePhase => 3,
            Self::ShieldWire => 1,
        }
    }
}

/// Vertical drop between the tower arm and the conductor clamp.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Suspension {
    /// Insulator string from the catalog.
    Insulator {
        /// String name.
        name: String,
        /// String length (m).
        length: Scalar,
    },
    /// Bare vertical offset in metres (e.g. a shield wire clamp).
    Offset(Scalar),
}

impl Suspension {
    /// Vertical drop in metres.
    #[must_use]
    pub fn drop(&self) -> Scalar {
        match self {
            Self::Insulator { length, .. } => *length,
            Self::Offset(offset) => *offset,
        }
    }
}

impl Default for Suspension {
    fn default() -> Self {
        Self::Offset(0.0)
    }
}

impl From<&InsulatorString> for Suspension {
    fn from(string: &InsulatorString) -> Self {
        Self::Insulator {
            name: string.name().to_owned(),
            length: string.string_length(),
        }
    }
}

impl From<Scalar> for Suspension {
    fn from(offset: Scalar) -> Self {
        Self::Offset(offset)
    }
}

/// Inputs for attaching a branch to a cross-section.
#[derive(Debug, Clone)]
pub struct BranchSpec {
    name: String,
    attachment: AttachmentPoints,
    conductor: ConductorType,
    offset: CScalar,
    suspension: Suspension,
    grounding: ShieldGrounding,
    sag: Scalar,
}

impl BranchSpec {
    /// Branch named `name` hung from `attachment` with conductor `conductor`.
    #[must_use]
    pub fn new(name: impl Into<String>, attachment: AttachmentPoints, conductor: &ConductorType) -> Self {
        Self {
            name: name.into(),
            attachment,
            conductor: conductor.clone(),
            offset: CScalar::new(0.0, 0.0),
            suspension: Suspension::default(),
            grounding: ShieldGrounding::default(),
            sag: 0.0,
        }
    }

    /// Tower position relative to the section origin (`x + j·y`, m).
    #[must_use]
    pub fn offset(mut self, offset: CScalar) -> Self {
        self.offset = offset;
        self
    }

    /// Insulator string or bare vertical offset.
    #[must_use]
    pub fn suspension(mut self, suspension: impl Into<Suspension>) -> Self {
        self.suspension = suspension.into();
        self
    }

    /// Shield-wire grounding; ignored for three-phase circuits.
    #[must_use]
    pub fn grounding(mut self, grounding: ShieldGrounding) -> Self {
        self.grounding = grounding;
        self
    }

    /// Mid-span sag (m).
    #[must_use]
    pub fn sag(mut self, sag: Scalar) -> Self {
        self.sag = sag;
        self
    }
}

/// Ground-return model shared by every branch of a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GroundReturn {
    /// `Rz`, Ω/km.
    pub resistance: Scalar,
    /// `Dz`, m.
    pub depth: Scalar,
    /// `K = ω·μ₀/(2π)`, Ω/km.
    pub reactance_coefficient: Scalar,
}

impl GroundReturn {
    pub(crate) fn new(config: &SectionConfig) -> Self {
        Self {
            resistance: config.ground_resistance,
            depth: config.ground_depth,
            reactance_coefficient: reactance_coefficient(config.frequency_hz),
        }
    }

    /// `Rz + j·K·ln(Dz/d)`.
    pub(crate) fn loop_impedance(&self, distance: Scalar, quantity: &'static str) -> Result<CScalar> {
        let log = ln_ratio(self.depth, distance, quantity)?;
        Ok(self.resistance + J * (self.reactance_coefficient * log))
    }
}

/// Self series impedances (Ω/km) and potential coefficients (km/F) of a branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfTerms {
    /// Positive-sequence self impedance.
    pub z1: CScalar,
    /// Zero-sequence self impedance.
    pub z0: CScalar,
    /// Positive-sequence potential coefficient.
    pub a1: Scalar,
    /// Zero-sequence potential coefficient.
    pub a0: Scalar,
}

/// A three-phase circuit or a shield wire of a cross-section.
#[derive(Debug, Clone)]
pub struct Branch {
    name: String,
    kind: BranchKind,
    attachment: AttachmentPoints,
    conductor: ConductorType,
    offset: CScalar,
    suspension: Suspension,
    grounding: ShieldGrounding,
    sag: Scalar,
    coords: Vec<CScalar>,
    terms: SelfTerms,
    main_index: Option<usize>,
    nodes: Option<(usize, usize)>,
}

impl Branch {
    pub(crate) fn new(spec: BranchSpec, ground: &GroundReturn) -> Result<Self> {
        let BranchSpec {
            name,
            attachment,
            conductor,
            offset,
            suspension,
            grounding,
            sag,
        } = spec;
        let (kind, grounding) = match attachment {
            AttachmentPoints::Phases(_) => (BranchKind::ThreePhase, ShieldGrounding::Standalone),
            AttachmentPoints::Shield(_) => (BranchKind::ShieldWire, grounding),
        };
        let coords = conductor_positions(&attachment, offset, suspension.drop(), sag);
        let terms = match kind {
            BranchKind::ThreePhase => three_phase_terms(&coords, &conductor, ground)?,
            BranchKind::ShieldWire => shield_terms(coords[0], &conductor, ground)?,
        };
        Ok(Self {
            name,
            kind,
            attachment,
            conductor,
            offset,
            suspension,
            grounding,
            sag,
            coords,
            terms,
            main_index: None,
            nodes: None,
        })
    }

    pub(crate) fn set_main_index(&mut self, index: usize) {
        self.main_index = Some(index);
    }

    pub(crate) fn set_nodes(&mut self, q1: usize, q2: usize) {
        self.nodes = Some((q1, q2));
    }

    /// Branch name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Three-phase circuit or shield wire.
    #[must_use]
    pub fn kind(&self) -> BranchKind {
        self.kind
    }

    /// Number of conductors (3 or 1).
    #[must_use]
    pub fn conductor_count(&self) -> usize {
        self.kind.conductor_count()
    }

    /// Grounding mode; always [`ShieldGrounding::Standalone`] for three-phase circuits.
    #[must_use]
    pub fn grounding(&self) -> ShieldGrounding {
        self.grounding
    }

    /// Conductor type.
    #[must_use]
    pub fn conductor(&self) -> &ConductorType {
        &self.conductor
    }

    /// Raw tower attachment points.
    #[must_use]
    pub fn attachment(&self) -> &AttachmentPoints {
        &self.attachment
    }

    /// Tower position offset.
    #[must_use]
    pub fn offset(&self) -> CScalar {
        self.offset
    }

    /// Suspension used for the vertical drop.
    #[must_use]
    pub fn suspension(&self) -> &Suspension {
        &self.suspension
    }

    /// Mid-span sag (m).
    #[must_use]
    pub fn sag(&self) -> Scalar {
        self.sag
    }

    /// Absolute conductor coordinates after offset, insulator drop and sag correction.
    #[must_use]
    pub fn coords(&self) -> &[CScalar] {
        &self.coords
    }

    /// Self impedance and potential coefficient terms.
    #[must_use]
    pub fn self_terms(&self) -> &SelfTerms {
        &self.terms
    }

    /// 0-based position in the main (non-eliminated) branch list.
    #[must_use]
    pub fn main_index(&self) -> Option<usize> {
        self.main_index
    }

    /// 1-based sequence number in the main list, as printed in reports.
    #[must_use]
    pub fn sequence_number(&self) -> Option<usize> {
        self.main_index.map(|i| i + 1)
    }

    /// Fault-network nodes the branch connects, if assigned.
    #[must_use]
    pub fn nodes(&self) -> Option<(usize, usize)> {
        self.nodes
    }
}

/// `raw + offset − j·(drop + 2/3·sag)` for every attachment point.
///
/// The 2/3 sag term approximates the average height over a parabolic span.
#[must_use]
pub fn conductor_positions(
    attachment: &AttachmentPoints,
    offset: CScalar,
    drop: Scalar,
    sag: Scalar,
) -> Vec<CScalar> {
    let delta = offset - J * (drop + 2.0 / 3.0 * sag);
    attachment.points().iter().map(|p| p + delta).collect()
}

fn three_phase_terms(coords: &[CScalar], conductor: &ConductorType, ground: &GroundReturn) -> Result<SelfTerms> {
    // Cyclic pairs (c0,c2), (c1,c0), (c2,c1).
    let previous = |i: usize| coords[(i + 2) % 3];
    let dp = geometric_mean((0..3).map(|i| (coords[i] - previous(i)).norm()));
    let sm = geometric_mean((0..3).map(|i| (coords[i] - previous(i).conj()).norm()));
    let sl = (8.0 * coords.iter().map(|c| c.im).product::<Scalar>()).cbrt();

    let zl = conductor.resistance() + ground.loop_impedance(conductor.impedance_radius(), "conductor radius")?;
    let zm = ground.loop_impedance(dp, "phase distance Dp")?;
    let al = POTENTIAL_COEFFICIENT * ln_ratio(sl, conductor.admittance_radius(), "image distance SL")?;
    let am = POTENTIAL_COEFFICIENT * ln_ratio(sm, dp, "image distance SM")?;
    Ok(SelfTerms {
        z1: zl - zm,
        z0: zl + 2.0 * zm,
        a1: al - am,
        a0: al + 2.0 * am,
    })
}

fn shield_terms(coord: CScalar, conductor: &ConductorType, ground: &GroundReturn) -> Result<SelfTerms> {
    let zl = 3.0 * (conductor.resistance() + ground.loop_impedance(conductor.impedance_radius(), "conductor radius")?);
    let al = POTENTIAL_COEFFICIENT * ln_ratio(2.0 * coord.im, conductor.admittance_radius(), "image distance SL")?;
    Ok(SelfTerms {
        z1: zl,
        z0: zl,
        a1: al,
        a0: al,
    })
}
