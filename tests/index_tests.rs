// tests/index_tests.rs
use std::collections::HashMap;

use land_health::error::AnalysisError;
use land_health::processing::indices::{bands, IndexCalculator, BSI, NDVI};
use land_health::raster::{Composite, GridShape, NODATA};

/// Helper function to build a composite with the given named bands
fn make_composite(width: usize, height: usize, layers: &[(&str, Vec<f32>)]) -> Composite {
    let grid = GridShape {
        width,
        height,
        origin_x: 0.0,
        origin_y: height as f64,
        pixel_size: 1.0,
    };
    let bands: HashMap<String, Vec<f32>> = layers
        .iter()
        .map(|(name, data)| (name.to_string(), data.clone()))
        .collect();
    Composite::new(grid, bands)
}

/// Test NDVI calculation with known values
#[test]
fn test_ndvi_calculation() {
    // Test data pairs (NIR, RED)
    let test_cases = [
        // NIR, RED, Expected NDVI
        (5000.0, 2500.0, 0.33333), // (5000-2500)/(5000+2500) = 0.33333
        (3000.0, 3000.0, 0.0),     // (3000-3000)/(3000+3000) = 0
        (1000.0, 500.0, 0.33333),  // (1000-500)/(1000+500) = 0.33333
        (0.0, 0.0, NODATA),        // Special case - divide by zero
    ];

    let nir: Vec<f32> = test_cases.iter().map(|(n, _, _)| *n).collect();
    let red: Vec<f32> = test_cases.iter().map(|(_, r, _)| *r).collect();
    let composite = make_composite(2, 2, &[(bands::NIR, nir), (bands::RED, red)]);

    let result = NDVI::default().calculate(&composite).unwrap();
    let values = result.data();

    for (i, (_, _, expected)) in test_cases.iter().enumerate() {
        if *expected == NODATA {
            assert_eq!(values[i], NODATA);
        } else {
            assert!(
                (values[i] - expected).abs() < 0.01,
                "Expected {}, got {} at index {}",
                expected,
                values[i],
                i
            );
        }
    }
}

/// Test BSI calculation with known values
#[test]
fn test_bsi_calculation() {
    // BSI = ((SWIR + RED) - (NIR + BLUE)) / ((SWIR + RED) + (NIR + BLUE))
    let test_cases = [
        // SWIR, RED, NIR, BLUE, Expected BSI
        (3000.0, 2500.0, 1500.0, 500.0, 0.46667), // (5500-2000)/(5500+2000)
        (2000.0, 1000.0, 2500.0, 500.0, 0.0),     // numerator is 0
        (1000.0, 500.0, 4000.0, 1500.0, -0.57143), // vegetated surface
        (0.0, 0.0, 0.0, 0.0, NODATA),             // Special case - divide by zero
    ];

    let swir: Vec<f32> = test_cases.iter().map(|(s, ..)| *s).collect();
    let red: Vec<f32> = test_cases.iter().map(|(_, r, ..)| *r).collect();
    let nir: Vec<f32> = test_cases.iter().map(|(_, _, n, ..)| *n).collect();
    let blue: Vec<f32> = test_cases.iter().map(|(_, _, _, b, _)| *b).collect();
    let composite = make_composite(
        2,
        2,
        &[
            (bands::SWIR, swir),
            (bands::RED, red),
            (bands::NIR, nir),
            (bands::BLUE, blue),
        ],
    );

    let result = BSI::default().calculate(&composite).unwrap();
    let values = result.data();

    for (i, (_, _, _, _, expected)) in test_cases.iter().enumerate() {
        if *expected == NODATA {
            assert_eq!(values[i], NODATA);
        } else {
            assert!(
                (values[i] - expected).abs() < 0.0001,
                "Expected {}, got {} at index {}",
                expected,
                values[i],
                i
            );
        }
    }
}

/// Test that a NODATA input band propagates to the output, never a zero
#[test]
fn test_ndvi_nodata_propagation() {
    let nir = vec![5000.0, NODATA, 5000.0, NODATA];
    let red = vec![2500.0, 2500.0, NODATA, NODATA];
    let composite = make_composite(2, 2, &[(bands::NIR, nir), (bands::RED, red)]);

    let result = NDVI::default().calculate(&composite).unwrap();
    let values = result.data();

    assert!((values[0] - 0.33333).abs() < 0.0001);
    assert_eq!(values[1], NODATA);
    assert_eq!(values[2], NODATA);
    assert_eq!(values[3], NODATA);
}

#[test]
fn test_bsi_nodata_propagation() {
    let swir = vec![3000.0, NODATA];
    let red = vec![2500.0, 2500.0];
    let nir = vec![1500.0, 1500.0];
    let blue = vec![500.0, 500.0];
    let composite = make_composite(
        2,
        1,
        &[
            (bands::SWIR, swir),
            (bands::RED, red),
            (bands::NIR, nir),
            (bands::BLUE, blue),
        ],
    );

    let result = BSI::default().calculate(&composite).unwrap();
    assert!((result.data()[0] - 0.46667).abs() < 0.0001);
    assert_eq!(result.data()[1], NODATA);
}

/// Test that custom names are properly set
#[test]
fn test_custom_index_names() {
    let custom_name = "Custom NDVI Name";
    let ndvi = NDVI::new(Some(custom_name.to_string()));
    assert_eq!(ndvi.name(), custom_name);

    let custom_bsi_name = "Custom BSI Name";
    let bsi = BSI::new(Some(custom_bsi_name.to_string()));
    assert_eq!(bsi.name(), custom_bsi_name);
}

/// Test that required_bands lists the correct bands for each calculator
#[test]
fn test_required_bands() {
    let ndvi = NDVI::default();
    assert_eq!(ndvi.required_bands(), &[bands::NIR, bands::RED]);

    let bsi = BSI::default();
    assert_eq!(
        bsi.required_bands(),
        &[bands::SWIR, bands::RED, bands::NIR, bands::BLUE]
    );
}

/// A composite missing a required band surfaces as an upstream failure
#[test]
fn test_missing_band_is_upstream_error() {
    let composite = make_composite(1, 1, &[(bands::NIR, vec![5000.0])]);
    let result = NDVI::default().calculate(&composite);
    assert!(matches!(result, Err(AnalysisError::Upstream(_))));
}
