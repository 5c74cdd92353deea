//! Binary glTF (GLB) import and export.
//!
//! Import flattens the source node hierarchy: every primitive's vertices
//! are pre-multiplied by their node's world transform, so the in-memory
//! [`Scene`] lives entirely in world space and downstream transforms never
//! have to walk a tree. Export writes one node per part into a single
//! self-contained GLB container (header + JSON chunk + BIN chunk), with
//! the material subset captured at import.

use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use crate::mesh::Mesh;
use crate::scene::{DoorScene, Material, PartInfo, Scene};
use hashbrown::HashMap;
use nalgebra::{Matrix4, Point3, Vector3};
use serde_json::{json, Value};

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

const GL_ARRAY_BUFFER: u32 = 34962;
const GL_ELEMENT_ARRAY_BUFFER: u32 = 34963;
const GL_FLOAT: u32 = 5126;
const GL_UNSIGNED_INT: u32 = 5125;

/// MIME type a stored GLB object is served under.
pub const GLB_MIME: &str = "model/gltf-binary";

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Import
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Parse a GLB buffer into a [`DoorScene`].
///
/// Uses the default scene (or the first one), walks its node tree, and
/// bakes each node's world transform into the vertices. Primitives that
/// are not triangle lists are skipped.
pub fn from_glb(bytes: &[u8]) -> Result<DoorScene, IoError> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;

    let materials: Vec<Material> = document
        .materials()
        .map(|m| {
            let pbr = m.pbr_metallic_roughness();
            Material {
                name: m.name().map(str::to_owned),
                base_color: pbr.base_color_factor(),
                metallic: pbr.metallic_factor(),
                roughness: pbr.roughness_factor(),
                double_sided: m.double_sided(),
            }
        })
        .collect();

    let source_scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(IoError::EmptyScene)?;

    let mut parts = Vec::new();
    for node in source_scene.nodes() {
        collect_parts(&node, &Matrix4::identity(), &buffers, &mut parts)?;
    }

    let scene = Scene::from_parts(parts, materials);
    if scene.is_empty() {
        return Err(IoError::EmptyScene);
    }
    Ok(scene)
}

fn node_matrix(node: &gltf::Node) -> Matrix4<Real> {
    // glTF matrices are column-major, like nalgebra's storage
    let m = node.transform().matrix();
    let flat: Vec<Real> = m.iter().flatten().map(|&v| v as Real).collect();
    Matrix4::from_column_slice(&flat)
}

fn collect_parts(
    node: &gltf::Node,
    parent: &Matrix4<Real>,
    buffers: &[gltf::buffer::Data],
    parts: &mut Vec<Mesh<PartInfo>>,
) -> Result<(), IoError> {
    let world = parent * node_matrix(node);

    if let Some(mesh) = node.mesh() {
        let normal_matrix = world
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix4::identity);

        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }

            let reader = prim.reader(|buffer| Some(&buffers[buffer.index()]));
            let Some(read_positions) = reader.read_positions() else {
                continue;
            };

            let positions: Vec<Point3<Real>> = read_positions
                .map(|p| world.transform_point(&Point3::new(p[0] as Real, p[1] as Real, p[2] as Real)))
                .collect();

            let normals: Option<Vec<Vector3<Real>>> = reader.read_normals().map(|it| {
                it.map(|n| {
                    let mapped = normal_matrix
                        .transform_vector(&Vector3::new(n[0] as Real, n[1] as Real, n[2] as Real));
                    let len = mapped.norm();
                    if len > 0.0 { mapped / len } else { mapped }
                })
                .collect()
            });

            let indices: Vec<u32> = match reader.read_indices() {
                Some(ix) => ix.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let mut polygons = Vec::with_capacity(indices.len() / 3);
            for tri in indices.chunks_exact(3) {
                let corner = |i: u32| -> Result<Point3<Real>, IoError> {
                    positions.get(i as usize).copied().ok_or_else(|| {
                        IoError::MalformedGeometry(format!(
                            "vertex index {i} out of range ({} positions)",
                            positions.len()
                        ))
                    })
                };
                let (a, b, c) = (corner(tri[0])?, corner(tri[1])?, corner(tri[2])?);

                let vertex = |p: Point3<Real>, i: u32| -> Vertex {
                    let normal = match &normals {
                        Some(ns) => ns.get(i as usize).copied().unwrap_or_else(Vector3::zeros),
                        // no source normals: fall back to the face normal
                        None => {
                            let n = (b - a).cross(&(c - a));
                            let len = n.norm();
                            if len > 0.0 { n / len } else { Vector3::zeros() }
                        },
                    };
                    Vertex::new(p, normal)
                };

                polygons.push(Polygon::new(
                    vec![vertex(a, tri[0]), vertex(b, tri[1]), vertex(c, tri[2])],
                    None,
                ));
            }

            if polygons.is_empty() {
                continue;
            }

            parts.push(Mesh::from_polygons(
                &polygons,
                Some(PartInfo {
                    name: mesh.name().map(str::to_owned),
                    material: prim.material().index(),
                }),
            ));
        }
    }

    for child in node.children() {
        collect_parts(&child, &world, buffers, parts)?;
    }
    Ok(())
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Export
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Weld a part's triangles into an indexed vertex list. Vertices are
/// deduplicated on exact bit patterns, which reconstructs the sharing the
/// importer flattened without ever merging distinct positions.
fn index_triangles<S: Clone + Send + Sync + std::fmt::Debug>(
    part: &Mesh<S>,
) -> Result<(Vec<Vertex>, Vec<u32>), IoError> {
    let mut seen: HashMap<[u64; 6], u32> = HashMap::new();
    let mut vertices = Vec::<Vertex>::new();
    let mut indices = Vec::<u32>::new();

    for poly in &part.polygons {
        for tri in poly.triangulate() {
            for v in tri {
                if !v.pos.coords.iter().all(|c| c.is_finite()) {
                    return Err(IoError::MalformedGeometry(format!(
                        "non-finite vertex position {:?}",
                        v.pos
                    )));
                }
                let key = [
                    v.pos.x.to_bits(),
                    v.pos.y.to_bits(),
                    v.pos.z.to_bits(),
                    v.normal.x.to_bits(),
                    v.normal.y.to_bits(),
                    v.normal.z.to_bits(),
                ];
                let next = vertices.len() as u32;
                let idx = *seen.entry(key).or_insert_with(|| {
                    vertices.push(v);
                    next
                });
                indices.push(idx);
            }
        }
    }

    Ok((vertices, indices))
}

fn material_to_json(m: &Material) -> Value {
    let mut v = json!({
        "pbrMetallicRoughness": {
            "baseColorFactor": m.base_color,
            "metallicFactor": m.metallic,
            "roughnessFactor": m.roughness,
        },
        "doubleSided": m.double_sided,
    });
    if let Some(name) = &m.name {
        v["name"] = json!(name);
    }
    v
}

/// Serialize a scene to a self-contained binary GLB buffer.
///
/// Geometry is emitted as one glTF mesh and node per part, POSITION and
/// NORMAL as `f32` vec3 accessors (with the min/max bounds required for
/// POSITION) and UNSIGNED_INT indices, all backed by the single BIN chunk.
pub fn to_glb(scene: &DoorScene, name: &str) -> Result<Vec<u8>, IoError> {
    if scene.is_empty() {
        return Err(IoError::EmptyScene);
    }

    let mut bin = Vec::<u8>::new();
    let mut buffer_views = Vec::<Value>::new();
    let mut accessors = Vec::<Value>::new();
    let mut meshes = Vec::<Value>::new();
    let mut nodes = Vec::<Value>::new();

    for part in &scene.parts {
        if part.polygons.is_empty() {
            continue;
        }
        let (vertices, indices) = index_triangles(part)?;

        let mut position_bytes = Vec::with_capacity(vertices.len() * 12);
        let mut normal_bytes = Vec::with_capacity(vertices.len() * 12);
        let mut index_bytes = Vec::with_capacity(indices.len() * 4);
        let mut position_min = [f32::MAX; 3];
        let mut position_max = [f32::MIN; 3];

        for v in &vertices {
            let p = [v.pos.x as f32, v.pos.y as f32, v.pos.z as f32];
            let n = [v.normal.x as f32, v.normal.y as f32, v.normal.z as f32];
            for axis in 0..3 {
                position_min[axis] = position_min[axis].min(p[axis]);
                position_max[axis] = position_max[axis].max(p[axis]);
                position_bytes.extend_from_slice(&p[axis].to_le_bytes());
            }
            for component in n {
                normal_bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        for &idx in &indices {
            index_bytes.extend_from_slice(&idx.to_le_bytes());
        }

        // all three views are multiples of 4 bytes, so offsets stay aligned
        let mut push_view = |bytes: &[u8], target: u32| -> usize {
            let view = json!({
                "buffer": 0,
                "byteOffset": bin.len(),
                "byteLength": bytes.len(),
                "target": target,
            });
            bin.extend_from_slice(bytes);
            buffer_views.push(view);
            buffer_views.len() - 1
        };

        let position_view = push_view(&position_bytes, GL_ARRAY_BUFFER);
        let normal_view = push_view(&normal_bytes, GL_ARRAY_BUFFER);
        let index_view = push_view(&index_bytes, GL_ELEMENT_ARRAY_BUFFER);

        let position_accessor = accessors.len();
        accessors.push(json!({
            "bufferView": position_view,
            "componentType": GL_FLOAT,
            "count": vertices.len(),
            "type": "VEC3",
            "min": position_min,
            "max": position_max,
        }));
        let normal_accessor = accessors.len();
        accessors.push(json!({
            "bufferView": normal_view,
            "componentType": GL_FLOAT,
            "count": vertices.len(),
            "type": "VEC3",
        }));
        let index_accessor = accessors.len();
        accessors.push(json!({
            "bufferView": index_view,
            "componentType": GL_UNSIGNED_INT,
            "count": indices.len(),
            "type": "SCALAR",
        }));

        let mut primitive = json!({
            "attributes": { "POSITION": position_accessor, "NORMAL": normal_accessor },
            "indices": index_accessor,
        });
        let info = part.metadata.as_ref();
        if let Some(material) = info.and_then(|i| i.material) {
            if material < scene.materials.len() {
                primitive["material"] = json!(material);
            }
        }

        let mesh_index = meshes.len();
        let mut mesh_json = json!({ "primitives": [primitive] });
        let mut node_json = json!({ "mesh": mesh_index });
        if let Some(part_name) = info.and_then(|i| i.name.as_deref()) {
            mesh_json["name"] = json!(part_name);
            node_json["name"] = json!(part_name);
        }
        meshes.push(mesh_json);
        nodes.push(node_json);
    }

    let mut root = json!({
        "asset": { "version": "2.0", "generator": "doorscale" },
        "buffers": [{ "byteLength": bin.len() }],
        "bufferViews": buffer_views,
        "accessors": accessors,
        "meshes": meshes,
        "nodes": nodes,
        "scenes": [{ "name": name, "nodes": (0..nodes.len()).collect::<Vec<usize>>() }],
        "scene": 0,
    });
    if !scene.materials.is_empty() {
        root["materials"] = Value::Array(scene.materials.iter().map(material_to_json).collect());
    }

    let json_bytes = serde_json::to_vec(&root)?;
    Ok(glb_container(json_bytes, bin))
}

/// Frame JSON and BIN chunks into a GLB container. Chunks are padded to
/// 4-byte boundaries (spaces for JSON, zeros for BIN) per the container
/// format.
fn glb_container(mut json: Vec<u8>, mut bin: Vec<u8>) -> Vec<u8> {
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json);

    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);

    out
}

/// Size sanity gate applied to an exported buffer before it is forwarded
/// to upload. A tiny buffer means the export truncated or failed; an
/// oversized one would be rejected at the relay boundary anyway.
pub fn check_output_size(buffer: &[u8], floor: usize, ceiling: usize) -> Result<(), IoError> {
    if buffer.len() < floor {
        return Err(IoError::UndersizedOutput {
            len: buffer.len(),
            floor,
        });
    }
    if buffer.len() > ceiling {
        return Err(IoError::OversizedOutput {
            len: buffer.len(),
            ceiling,
        });
    }
    Ok(())
}
