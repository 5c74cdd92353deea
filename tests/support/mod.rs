//! Shared fixtures for integration tests: an in-memory object store, a
//! failing store, and a panel-shaped reference scene.
//!
//! Each test binary compiles its own copy, so not every item is used
//! everywhere.
#![allow(dead_code)]

use async_trait::async_trait;
use doorscale::config::{ServiceConfig, StorageConfig};
use doorscale::dims::DimensionLimits;
use doorscale::mesh::polygon::Polygon;
use doorscale::mesh::vertex::Vertex;
use doorscale::mesh::Mesh;
use doorscale::scene::{DoorScene, Material, PartInfo, Scene};
use doorscale::storage::{ObjectStore, StoreError};
use nalgebra::{Point3, Vector3};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Stores objects in a map so tests can assert on what was uploaded.
#[derive(Default)]
pub struct MemStore {
    pub objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }
}

#[async_trait]
impl ObjectStore for MemStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        self.objects
            .lock()
            .insert(key.to_owned(), (content_type.to_owned(), bytes));
        Ok(())
    }
}

/// Always fails, standing in for an unreachable backend.
pub struct FailStore;

#[async_trait]
impl ObjectStore for FailStore {
    async fn put(&self, _: &str, _: Vec<u8>, _: &str) -> Result<(), StoreError> {
        Err(StoreError("injected backend outage".into()))
    }
}

/// A closed box panel, deliberately offset from the origin so pivot
/// normalization has work to do.
pub fn panel_scene(width: f64, height: f64, depth: f64) -> DoorScene {
    let mins = Point3::new(3.0, 1.5, -2.0);
    let maxs = Point3::new(3.0 + width, 1.5 + height, -2.0 + depth);
    let corner = |x: bool, y: bool, z: bool| {
        Point3::new(
            if x { maxs.x } else { mins.x },
            if y { maxs.y } else { mins.y },
            if z { maxs.z } else { mins.z },
        )
    };
    let quad = |pts: [Point3<f64>; 4], n: Vector3<f64>| {
        Polygon::new(pts.map(|p| Vertex::new(p, n)).to_vec(), None)
    };

    let polygons = vec![
        quad(
            [
                corner(false, false, true),
                corner(true, false, true),
                corner(true, true, true),
                corner(false, true, true),
            ],
            Vector3::z(),
        ),
        quad(
            [
                corner(true, false, false),
                corner(false, false, false),
                corner(false, true, false),
                corner(true, true, false),
            ],
            -Vector3::z(),
        ),
        quad(
            [
                corner(false, false, false),
                corner(false, false, true),
                corner(false, true, true),
                corner(false, true, false),
            ],
            -Vector3::x(),
        ),
        quad(
            [
                corner(true, false, true),
                corner(true, false, false),
                corner(true, true, false),
                corner(true, true, true),
            ],
            Vector3::x(),
        ),
        quad(
            [
                corner(false, false, false),
                corner(true, false, false),
                corner(true, false, true),
                corner(false, false, true),
            ],
            -Vector3::y(),
        ),
        quad(
            [
                corner(false, true, true),
                corner(true, true, true),
                corner(true, true, false),
                corner(false, true, false),
            ],
            Vector3::y(),
        ),
    ];

    Scene::from_parts(
        vec![Mesh::from_polygons(
            &polygons,
            Some(PartInfo {
                name: Some("door-panel".into()),
                material: Some(0),
            }),
        )],
        vec![Material {
            name: Some("oak".into()),
            base_color: [0.55, 0.38, 0.21, 1.0],
            metallic: 0.0,
            roughness: 0.8,
            double_sided: false,
        }],
    )
}

/// Service configuration pointed at nothing real; integration tests swap
/// the store for a double, so the storage values are only ever echoed
/// back in URLs.
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        bind_addr: "127.0.0.1:0".into(),
        model_path: "assets/door.glb".into(),
        storage: StorageConfig {
            region: "us-east-1".into(),
            bucket: "doors-test".into(),
            public_base_url: "https://cdn.example.com".into(),
        },
        limits: DimensionLimits::default(),
        min_export_bytes: 1024,
        max_upload_bytes: 50 * 1024 * 1024,
    }
}
