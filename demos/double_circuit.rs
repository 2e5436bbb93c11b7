use std::io;

use ohl_params::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base = TowerGeometry::new(
        "P220-2",
        [CScalar::new(-5.0, 16.5), CScalar::new(-7.0, 23.0), CScalar::new(-5.0, 29.5)],
    )
    .with_circuit2([CScalar::new(5.0, 16.5), CScalar::new(7.0, 23.0), CScalar::new(5.0, 29.5)])
    .with_shield1(CScalar::new(-3.0, 35.0))
    .with_shield2(CScalar::new(3.0, 35.0));
    // Tall variant used on the river crossing.
    let tower = base.raised("P220-2+5", 5.0)?;

    let single = ConductorType::new("AC-300/39", 0.098, 24.0)?;
    let bundle = single.bundle("2xAC-300/39", 2, 0.4)?;
    let wire = ConductorType::steel_wire("S-70", 2.5, 0.29, 11.0)?;
    let string = InsulatorString::unit("PS-120B", 0.146)?.string(16)?;

    let mut section = CrossSection::new("220 kV double circuit", SectionConfig::default().with_length(38.0));
    let l1 = section.add_branch(
        BranchSpec::new("L1 220 kV", tower.slot(TowerSlot::Circuit1)?, &bundle)
            .suspension(&string)
            .sag(9.0),
    )?;
    let l2 = section.add_branch(
        BranchSpec::new("L2 220 kV", tower.slot(TowerSlot::Circuit2)?, &bundle)
            .suspension(&string)
            .sag(9.0),
    )?;
    section.connect(l1, 1, 2)?;
    section.connect(l2, 1, 3)?;
    section.add_branch(
        BranchSpec::new("T1", tower.slot(TowerSlot::Shield1)?, &wire)
            .suspension(Suspension::Offset(0.5))
            .grounding(ShieldGrounding::BothEnds)
            .sag(7.0),
    )?;
    section.add_branch(
        BranchSpec::new("T2", tower.slot(TowerSlot::Shield2)?, &wire)
            .suspension(Suspension::Offset(0.5))
            .grounding(ShieldGrounding::OneEnd)
            .sag(7.0),
    )?;
    section.calc()?;

    write_report(io::stdout().lock(), &section)
}
