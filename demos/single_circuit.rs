use ohl_params::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 110 kV single-circuit tower with one shield wire.
    let tower = TowerGeometry::new(
        "P110-1",
        [CScalar::new(-2.0, 16.5), CScalar::new(3.5, 19.0), CScalar::new(2.0, 22.5)],
    )
    .with_shield1(CScalar::new(0.0, 26.5));
    let conductor = ConductorType::new("AC-185/29", 0.159, 18.8)?;
    let wire = ConductorType::steel_wire("S-50", 3.75, 0.35, 9.1)?;
    let string = InsulatorString::unit("PS-70E", 0.146)?.string(8)?;

    let mut section = CrossSection::new("110 kV line", SectionConfig::default().with_length(24.3));
    let line = section.add_branch(
        BranchSpec::new("L-110", tower.slot(TowerSlot::Circuit1)?, &conductor)
            .suspension(&string)
            .sag(5.5),
    )?;
    section.add_branch(
        BranchSpec::new("T", tower.slot(TowerSlot::Shield1)?, &wire)
            .suspension(Suspension::Offset(0.3))
            .grounding(ShieldGrounding::BothEnds)
            .sag(4.5),
    )?;
    section.calc()?;

    println!("Z1 = {:.4} Ω, Z0 = {:.4} Ω", section.z1(line)?, section.z0(line)?);
    println!("B1 = {:.3e} S, B0 = {:.3e} S", section.b1(line)?.im, section.b0(line)?.im);
    Ok(())
}
