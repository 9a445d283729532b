use bagofwaves::{
    atom::BOHR_TO_ANGSTROM,
    backend::{gaussian::GaussianEvaluator, surface::VdwSurface, OrbitalEvaluator, SurfaceSampler},
    config::linspace,
    molden::MoldenFile,
    testing::hydrogen_chain_log,
    Descriptor,
};
use std::error::Error;

use criterion::{criterion_group, criterion_main, Criterion};

const CHAIN_LENGTHS: [usize; 3] = [2, 8, 24];

fn bench_parse(c: &mut Criterion, logs: &[(usize, String)]) {
    for (n_atoms, log) in logs {
        c.bench_function(&format!("Parse H{n_atoms}"), move |b| {
            b.iter(|| MoldenFile::from_log(log.as_bytes()))
        });
    }
}

fn bench_orbitals(c: &mut Criterion, files: &[(usize, MoldenFile)]) -> Result<(), Box<dyn Error>> {
    for (n_atoms, molden) in files {
        let basis = molden.basis()?;
        let orbitals = molden.orbital_set()?;
        let molecule = molden.molecule();
        let points = VdwSurface::default()
            .surface_points(&molecule.positions_angstrom(), &molecule.elements()?)?
            .into_iter()
            .map(|point| point / BOHR_TO_ANGSTROM)
            .collect::<Vec<_>>();
        let indices = (0..orbitals.n_orbitals()).collect::<Vec<_>>();

        c.bench_function(&format!("Orbitals H{n_atoms}"), move |b| {
            b.iter(|| {
                GaussianEvaluator.evaluate_orbitals(&basis, orbitals.alpha(), &points, &indices)
            })
        });
    }

    Ok(())
}

fn bench_descriptor(c: &mut Criterion, files: &[(usize, MoldenFile)]) {
    let grid = linspace(-20.0, 2.0, 10);

    for (n_atoms, molden) in files {
        let grid = &grid;
        c.bench_function(&format!("Descriptor H{n_atoms}"), move |b| {
            b.iter(|| {
                Descriptor::compute(
                    molden,
                    grid,
                    1.0,
                    &GaussianEvaluator,
                    &VdwSurface::default(),
                )
            })
        });
    }
}

fn bench_all(c: &mut Criterion) -> Result<(), Box<dyn Error>> {
    let logs = CHAIN_LENGTHS
        .iter()
        .map(|&n_atoms| (n_atoms, hydrogen_chain_log(n_atoms, n_atoms, 0.74)))
        .collect::<Vec<_>>();
    let files = logs
        .iter()
        .map(|(n_atoms, log)| Ok((*n_atoms, MoldenFile::from_log(log.as_bytes())?)))
        .collect::<Result<Vec<_>, Box<dyn Error>>>()?;

    bench_parse(c, &logs);
    bench_orbitals(c, &files)?;
    bench_descriptor(c, &files);

    Ok(())
}

fn benches(c: &mut Criterion) {
    bench_all(c).unwrap();
}

criterion_group!(descriptor_benches, benches);
criterion_main!(descriptor_benches);
