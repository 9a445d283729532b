use approx::assert_relative_eq;
use bagofwaves::{
    backend::{
        gaussian::GaussianEvaluator, surface::VdwSurface, SurfaceError, SurfaceSampler,
    },
    compute_descriptor, compute_descriptor_with,
    molden::{MoldenError, MoldenFile},
    periodic_table::{ElementError, ElementType},
    testing::hydrogen_chain_log,
    wavefunction::WavefunctionError,
    Error,
};
use flate2::{write::GzEncoder, Compression};
use nalgebra::Vector3;
use std::io::Write;

/// Points on the z axis between and beyond the atoms, in Ångström
struct AxisPoints;

impl SurfaceSampler for AxisPoints {
    fn surface_points(
        &self,
        positions: &[Vector3<f64>],
        _elements: &[ElementType],
    ) -> Result<Vec<Vector3<f64>>, SurfaceError> {
        Ok(positions
            .iter()
            .map(|position| position + Vector3::new(0.0, 0.0, 0.37))
            .collect())
    }
}

fn grid() -> Vec<f64> {
    bagofwaves::config::linspace(-1.5, 1.0, 6)
}

#[test]
fn descriptor_from_log_has_one_row_per_surface_point() {
    let log = hydrogen_chain_log(2, 2, 0.74);

    let descriptor = compute_descriptor_with(
        log.as_bytes(),
        &grid(),
        0.5,
        &GaussianEvaluator,
        &VdwSurface::default(),
    )
    .unwrap();

    assert!(descriptor.n_points() > 0);
    assert_eq!(descriptor.values.shape(), (descriptor.points.len(), 6));
    assert!(descriptor
        .values
        .iter()
        .all(|value| value.is_finite() && *value >= 0.0));

    let values = compute_descriptor(log.as_bytes(), &grid(), 0.5).unwrap();
    assert_eq!(values, descriptor.values);
}

#[test]
fn surface_points_lie_outside_every_atom() {
    let log = hydrogen_chain_log(3, 3, 0.9);
    let surface = VdwSurface::default();

    let descriptor =
        compute_descriptor_with(log.as_bytes(), &grid(), 1.0, &GaussianEvaluator, &surface)
            .unwrap();

    let radius = surface.scale_factor * ElementType::H.vdw_radius().unwrap();
    for point in &descriptor.points {
        for i in 0..3 {
            let center = Vector3::new(0.0, 0.0, i as f64 * 0.9);
            assert!((point - center).norm() >= radius - 1e-9);
        }
    }
}

#[test]
fn mirror_image_points_see_the_same_density() {
    // the chain is symmetric about its midpoint, so are the squared orbitals
    struct MirrorPair;

    impl SurfaceSampler for MirrorPair {
        fn surface_points(
            &self,
            _positions: &[Vector3<f64>],
            _elements: &[ElementType],
        ) -> Result<Vec<Vector3<f64>>, SurfaceError> {
            Ok(vec![
                Vector3::new(0.3, 0.1, -0.8),
                Vector3::new(0.3, 0.1, 0.74 + 0.8),
            ])
        }
    }

    let log = hydrogen_chain_log(2, 2, 0.74);
    let descriptor =
        compute_descriptor_with(log.as_bytes(), &grid(), 0.5, &GaussianEvaluator, &MirrorPair)
            .unwrap();

    for column in 0..grid().len() {
        assert_relative_eq!(
            descriptor.values[(0, column)],
            descriptor.values[(1, column)],
            max_relative = 1e-6
        );
    }
}

#[test]
fn unrestricted_channels_are_truncated_to_the_shorter_one() {
    let log = hydrogen_chain_log(4, 2, 0.8);
    let molden = MoldenFile::from_log(log.as_bytes()).unwrap();
    assert_eq!(molden.alpha_orbitals().len(), 4);
    assert_eq!(molden.beta_orbitals().len(), 2);

    let orbitals = molden.orbital_set().unwrap();
    assert_eq!(orbitals.n_orbitals(), 2);
    assert_eq!(orbitals.n_basis(), 4);

    let descriptor =
        compute_descriptor_with(log.as_bytes(), &grid(), 0.5, &GaussianEvaluator, &AxisPoints)
            .unwrap();
    assert_eq!(descriptor.values.shape(), (4, 6));
}

#[test]
fn windows_line_endings_parse_identically() {
    let log = hydrogen_chain_log(2, 2, 0.74);
    let crlf = log.replace('\n', "\r\n");

    let unix = MoldenFile::from_log(log.as_bytes()).unwrap();
    let windows = MoldenFile::from_log(crlf.as_bytes()).unwrap();
    assert_eq!(unix, windows);
}

#[test]
fn compressed_log_gives_the_same_descriptor() {
    let log = hydrogen_chain_log(2, 2, 0.74);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(log.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let plain = compute_descriptor(log.as_bytes(), &grid(), 0.5).unwrap();
    let unpacked = compute_descriptor(compressed.as_slice(), &grid(), 0.5).unwrap();
    assert_eq!(plain, unpacked);
}

#[test]
fn restricted_log_is_rejected() {
    let log = hydrogen_chain_log(2, 0, 0.74);

    let result = compute_descriptor(log.as_bytes(), &grid(), 0.5);
    assert!(matches!(
        result,
        Err(Error::Wavefunction(WavefunctionError::Restricted))
    ));
}

#[test]
fn log_without_molden_block_yields_no_orbitals() {
    let log = " Welcome to Q-Chem\n Total job time: 0.01s(wall)\n";

    let result = compute_descriptor(log.as_bytes(), &grid(), 0.5);
    assert!(matches!(result, Err(Error::Wavefunction(_))));
}

#[test]
fn unknown_shell_type_is_fatal() {
    let log = hydrogen_chain_log(2, 2, 0.74).replacen(" s    3 1.00", " z5   3 1.00", 1);

    let result = compute_descriptor(log.as_bytes(), &grid(), 0.5);
    assert!(matches!(
        result,
        Err(Error::Molden(MoldenError::UnknownShellType { ref token, .. })) if token == "z5"
    ));
}

#[test]
fn unknown_element_is_fatal() {
    let log = hydrogen_chain_log(1, 1, 0.74).replacen("    1    1 ", "    1  200 ", 1);

    let result = compute_descriptor(log.as_bytes(), &grid(), 0.5);
    assert!(matches!(
        result,
        Err(Error::Element(ElementError::UnknownAtomicNumber(200)))
    ));
}

#[test]
fn descriptor_saves_as_json() {
    let log = hydrogen_chain_log(2, 2, 0.74);
    let descriptor =
        compute_descriptor_with(log.as_bytes(), &grid(), 0.5, &GaussianEvaluator, &AxisPoints)
            .unwrap();

    let path = std::env::temp_dir().join(format!("bagofwaves-{}.json", std::process::id()));
    descriptor.save(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(json["values"].as_array().unwrap().len(), 2);
    assert_eq!(json["values"][0].as_array().unwrap().len(), 6);
}
