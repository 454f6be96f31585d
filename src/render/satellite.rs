//! Satellite assembly.
//!
//! The satellite is described as a tree of [`Part`]s first and spawned
//! second, so its layout can be inspected without a renderer. Only the
//! greeble modules under the bus are randomized.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use rand::Rng;

use super::motion::OrbitingSatellite;
use super::textures::{
    TEXTURE_SIZE, anisotropic_sampler, image_or_blank, paint_foil, paint_solar_grid,
    repeat_sampler,
};
use crate::types::SceneEntity;

const BUS_SIZE: Vec3 = Vec3::new(0.2, 0.2, 0.3);
const GREEBLE_COUNT: usize = 8;
const WING_SEGMENTS: usize = 3;
const WING_PANEL_WIDTH: f32 = 0.14;
const WING_SPACING: f32 = 0.16;
const DISH_RADIUS: f32 = 0.1;
const DISH_OPENING: f32 = 0.6;

/// Primitive geometry of a part, in local units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartShape {
    Cuboid(Vec3),
    Cylinder { radius: f32, height: f32, resolution: u32 },
    Sphere { radius: f32, sectors: u32, stacks: u32 },
    /// Spherical cap around `+Y`, opening half-angle `opening`.
    Dish { radius: f32, opening: f32, sectors: u32, rings: u32 },
    Disc { radius: f32, resolution: u32 },
}

impl PartShape {
    pub fn mesh(self) -> Mesh {
        match self {
            PartShape::Cuboid(size) => Cuboid::from_size(size).into(),
            PartShape::Cylinder {
                radius,
                height,
                resolution,
            } => Cylinder::new(radius, height).mesh().resolution(resolution).into(),
            PartShape::Sphere {
                radius,
                sectors,
                stacks,
            } => Sphere::new(radius).mesh().uv(sectors, stacks),
            PartShape::Dish {
                radius,
                opening,
                sectors,
                rings,
            } => dish_mesh(radius, opening, sectors, rings),
            PartShape::Disc { radius, resolution } => {
                Circle::new(radius).mesh().resolution(resolution).into()
            }
        }
    }
}

/// Surface treatment of a part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finish {
    Foil,
    SolarPanel,
    GrayMetal,
    DarkMetal,
    Dish,
    Lens,
}

/// One node of the satellite tree. Parts without a shape are pure groups.
#[derive(Clone, Debug)]
pub struct Part {
    pub name: &'static str,
    pub shape: Option<(PartShape, Finish)>,
    pub transform: Transform,
    pub children: Vec<Part>,
}

impl Part {
    fn solid(name: &'static str, shape: PartShape, finish: Finish, transform: Transform) -> Self {
        Self {
            name,
            shape: Some((shape, finish)),
            transform,
            children: Vec::new(),
        }
    }

    fn group(name: &'static str, transform: Transform, children: Vec<Part>) -> Self {
        Self {
            name,
            shape: None,
            transform,
            children,
        }
    }

    fn with_child(mut self, child: Part) -> Self {
        self.children.push(child);
        self
    }

    /// Number of parts in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Part::count).sum::<usize>()
    }

    /// Visit every part in this subtree depth-first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Part)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

/// Thin cylinder spanning `from` to `to`.
fn tube(from: Vec3, to: Vec3) -> Part {
    let span = to - from;
    Part::solid(
        "tube",
        PartShape::Cylinder {
            radius: 0.005,
            height: span.length(),
            resolution: 8,
        },
        Finish::DarkMetal,
        Transform::from_translation((from + to) * 0.5)
            .with_rotation(Quat::from_rotation_arc(Vec3::Y, span.normalize_or(Vec3::Y))),
    )
}

/// Three solar panels with frames and hinge struts, extending along `direction` (±1) on X.
fn wing(direction: f32) -> Part {
    let mut parts = Vec::new();
    for i in 0..WING_SEGMENTS {
        let x = (i as f32 * WING_SPACING + 0.1) * direction;

        parts.push(Part::solid(
            "solar panel",
            PartShape::Cuboid(Vec3::new(WING_PANEL_WIDTH, 0.22, 0.01)),
            Finish::SolarPanel,
            Transform::from_xyz(x, 0.0, 0.0),
        ));
        parts.push(Part::solid(
            "panel frame",
            PartShape::Cuboid(Vec3::new(WING_PANEL_WIDTH + 0.01, 0.23, 0.005)),
            Finish::DarkMetal,
            Transform::from_xyz(x, 0.0, -0.004),
        ));

        if i + 1 < WING_SEGMENTS {
            let hinge = (i as f32 * WING_SPACING + 0.1 + WING_PANEL_WIDTH / 2.0 + 0.01) * direction;
            parts.push(Part::solid(
                "hinge strut",
                PartShape::Cylinder {
                    radius: 0.005,
                    height: 0.04,
                    resolution: 8,
                },
                Finish::DarkMetal,
                Transform::from_xyz(hinge, 0.0, 0.0).with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            ));
        }
    }

    let name = if direction < 0.0 { "port wing" } else { "starboard wing" };
    Part::group(name, Transform::IDENTITY, parts)
}

/// High gain antenna: reflector cap, three feed struts and the feed horn.
fn dish_assembly() -> Part {
    let feed = Vec3::new(0.0, 0.08, 0.0);
    let strut_target = Vec3::new(0.0, 0.1, 0.0);

    let mut parts = vec![Part::solid(
        "reflector",
        PartShape::Dish {
            radius: DISH_RADIUS,
            opening: DISH_OPENING,
            sectors: 32,
            rings: 12,
        },
        Finish::Dish,
        Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    )];

    for i in 0..3 {
        let angle = i as f32 / 3.0 * TAU;
        let base = Vec3::new(angle.cos() * 0.04, 0.05, angle.sin() * 0.04);
        let axis = (strut_target - base).normalize_or(Vec3::Y);
        parts.push(Part::solid(
            "feed strut",
            PartShape::Cylinder {
                radius: 0.003,
                height: 0.12,
                resolution: 8,
            },
            Finish::DarkMetal,
            Transform::from_translation(base).with_rotation(Quat::from_rotation_arc(Vec3::Y, axis)),
        ));
    }

    parts.push(Part::solid(
        "feed",
        PartShape::Sphere {
            radius: 0.015,
            sectors: 8,
            stacks: 8,
        },
        Finish::DarkMetal,
        Transform::from_translation(feed),
    ));

    Part::group(
        "antenna",
        Transform::from_xyz(0.0, 0.15, 0.0).with_rotation(Quat::from_rotation_x(-FRAC_PI_3)),
        parts,
    )
}

/// Camera body pointing along `+Z` with its lens on the front face.
fn sensor() -> Part {
    Part::solid(
        "sensor",
        PartShape::Cylinder {
            radius: 0.035,
            height: 0.06,
            resolution: 16,
        },
        Finish::DarkMetal,
        Transform::from_xyz(0.05, -0.05, 0.16).with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    )
    .with_child(Part::solid(
        "lens",
        PartShape::Disc {
            radius: 0.025,
            resolution: 16,
        },
        Finish::Lens,
        Transform::from_xyz(0.0, 0.031, 0.0).with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
    ))
}

/// Build the full satellite layout. `rng` places the greeble modules.
pub fn satellite_blueprint(rng: &mut impl Rng) -> Part {
    let tank = PartShape::Cylinder {
        radius: 0.03,
        height: 0.08,
        resolution: 12,
    };

    let mut parts = vec![
        Part::solid("bus", PartShape::Cuboid(BUS_SIZE), Finish::Foil, Transform::IDENTITY),
        Part::solid("tank", tank, Finish::GrayMetal, Transform::from_xyz(0.08, 0.08, 0.0)),
        Part::solid("tank", tank, Finish::GrayMetal, Transform::from_xyz(-0.08, 0.08, 0.0)),
        tube(Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.1)),
        tube(Vec3::new(-0.1, 0.0, 0.0), Vec3::new(-0.1, 0.0, 0.1)),
    ];

    for i in 0..GREEBLE_COUNT {
        let x = rng.gen_range(-0.5..0.5f32) * 0.18;
        let z = rng.gen_range(-0.5..0.5f32) * 0.25;
        let finish = if i % 2 == 0 {
            Finish::GrayMetal
        } else {
            Finish::DarkMetal
        };
        parts.push(Part::solid(
            "module",
            PartShape::Cuboid(Vec3::new(0.04, 0.02, 0.04)),
            finish,
            Transform::from_xyz(x, -0.1, z),
        ));
    }

    parts.push(wing(-1.0));
    parts.push(wing(1.0));
    parts.push(dish_assembly());
    parts.push(sensor());

    Part::group("satellite", Transform::IDENTITY, parts)
}

/// Spherical cap mesh around `+Y`, `rings` bands from the pole to `opening`.
///
/// Normals point away from the sphere center. The pole row is degenerate,
/// so its upper triangles are skipped.
pub fn dish_mesh(radius: f32, opening: f32, sectors: u32, rings: u32) -> Mesh {
    let sectors = sectors.max(3);
    let rings = rings.max(1);
    let opening = opening.clamp(0.0, PI);

    let row = sectors as usize + 1;
    let mut positions = Vec::with_capacity(row * (rings as usize + 1));
    let mut normals = Vec::with_capacity(positions.capacity());
    let mut uvs = Vec::with_capacity(positions.capacity());

    for iy in 0..=rings {
        let v = iy as f32 / rings as f32;
        let theta = v * opening;
        let u_offset = if iy == 0 { 0.5 / sectors as f32 } else { 0.0 };

        for ix in 0..=sectors {
            let u = ix as f32 / sectors as f32;
            let phi = u * TAU;
            let p = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            positions.push(p.to_array());
            normals.push(p.normalize_or(Vec3::Y).to_array());
            uvs.push([u + u_offset, 1.0 - v]);
        }
    }

    let mut indices = Vec::new();
    let at = |iy: u32, ix: u32| iy * (sectors + 1) + ix;
    for iy in 0..rings {
        for ix in 0..sectors {
            let a = at(iy, ix + 1);
            let b = at(iy, ix);
            let c = at(iy + 1, ix);
            let d = at(iy + 1, ix + 1);
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != rings - 1 || opening < PI {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

/// Material handles, one per finish.
struct FinishMaterials {
    foil: Handle<StandardMaterial>,
    solar_panel: Handle<StandardMaterial>,
    gray_metal: Handle<StandardMaterial>,
    dark_metal: Handle<StandardMaterial>,
    dish: Handle<StandardMaterial>,
    lens: Handle<StandardMaterial>,
}

impl FinishMaterials {
    fn new(
        images: &mut Assets<Image>,
        materials: &mut Assets<StandardMaterial>,
        rng: &mut impl Rng,
    ) -> Self {
        let foil_image = images.add(image_or_blank(
            "foil",
            paint_foil(TEXTURE_SIZE, rng),
            repeat_sampler(),
        ));
        let solar_image = images.add(image_or_blank(
            "solar grid",
            paint_solar_grid(TEXTURE_SIZE, rng),
            anisotropic_sampler(),
        ));

        Self {
            foil: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                base_color_texture: Some(foil_image),
                metallic: 1.0,
                perceptual_roughness: 0.3,
                ..default()
            }),
            solar_panel: materials.add(StandardMaterial {
                base_color_texture: Some(solar_image),
                metallic: 0.8,
                perceptual_roughness: 0.2,
                emissive: LinearRgba::from(Color::srgb_u8(0x0a, 0x1d, 0x37)) * 0.5,
                ..default()
            }),
            gray_metal: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0x44, 0x44, 0x44),
                metallic: 0.9,
                perceptual_roughness: 0.4,
                ..default()
            }),
            dark_metal: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0x11, 0x11, 0x11),
                metallic: 0.8,
                perceptual_roughness: 0.6,
                ..default()
            }),
            dish: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0xcc, 0xcc, 0xcc),
                metallic: 0.8,
                perceptual_roughness: 0.3,
                double_sided: true,
                cull_mode: None,
                ..default()
            }),
            lens: materials.add(StandardMaterial {
                base_color: Color::BLACK,
                metallic: 1.0,
                perceptual_roughness: 0.0,
                ..default()
            }),
        }
    }

    fn get(&self, finish: Finish) -> Handle<StandardMaterial> {
        match finish {
            Finish::Foil => self.foil.clone(),
            Finish::SolarPanel => self.solar_panel.clone(),
            Finish::GrayMetal => self.gray_metal.clone(),
            Finish::DarkMetal => self.dark_metal.clone(),
            Finish::Dish => self.dish.clone(),
            Finish::Lens => self.lens.clone(),
        }
    }
}

/// Spawn the satellite tree. The root carries [`OrbitingSatellite`].
pub fn spawn_satellite(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();
    let finishes = FinishMaterials::new(&mut images, &mut materials, &mut rng);
    let blueprint = satellite_blueprint(&mut rng);

    let root = commands
        .spawn((
            blueprint.transform,
            Visibility::default(),
            OrbitingSatellite,
            SceneEntity,
            Name::new(blueprint.name),
        ))
        .id();

    for child in &blueprint.children {
        spawn_part(&mut commands, &mut meshes, &finishes, child, root);
    }

    info!("Satellite spawned with {} parts", blueprint.count());
}

fn spawn_part(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    finishes: &FinishMaterials,
    part: &Part,
    parent: Entity,
) {
    let mut entity = commands.spawn((part.transform, Name::new(part.name), ChildOf(parent)));
    match part.shape {
        Some((shape, finish)) => {
            entity.insert((
                Mesh3d(meshes.add(shape.mesh())),
                MeshMaterial3d(finishes.get(finish)),
            ));
        }
        None => {
            entity.insert(Visibility::default());
        }
    }
    let id = entity.id();

    for child in &part.children {
        spawn_part(commands, meshes, finishes, child, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn blueprint() -> Part {
        satellite_blueprint(&mut StdRng::seed_from_u64(7))
    }

    fn named<'a>(root: &'a Part, name: &str) -> Vec<&'a Part> {
        let mut found = Vec::new();
        root.visit(&mut |part| {
            if part.name == name {
                found.push(part);
            }
        });
        found
    }

    #[test]
    fn test_part_counts() {
        let root = blueprint();
        assert_eq!(named(&root, "bus").len(), 1);
        assert_eq!(named(&root, "tank").len(), 2);
        assert_eq!(named(&root, "tube").len(), 2);
        assert_eq!(named(&root, "module").len(), GREEBLE_COUNT);
        assert_eq!(named(&root, "solar panel").len(), 2 * WING_SEGMENTS);
        assert_eq!(named(&root, "panel frame").len(), 2 * WING_SEGMENTS);
        assert_eq!(named(&root, "hinge strut").len(), 2 * (WING_SEGMENTS - 1));
        assert_eq!(named(&root, "feed strut").len(), 3);
        assert_eq!(named(&root, "lens").len(), 1);
    }

    #[test]
    fn test_greebles_stay_under_bus() {
        for seed in 0..20 {
            let root = satellite_blueprint(&mut StdRng::seed_from_u64(seed));
            for module in named(&root, "module") {
                let p = module.transform.translation;
                assert!(p.x.abs() <= 0.09, "x {}", p.x);
                assert!(p.z.abs() <= 0.125, "z {}", p.z);
                assert_eq!(p.y, -0.1);
            }
        }
    }

    #[test]
    fn test_greeble_finishes_alternate() {
        let root = blueprint();
        let finishes: Vec<_> = named(&root, "module")
            .iter()
            .filter_map(|m| m.shape.map(|(_, finish)| finish))
            .collect();
        for (i, finish) in finishes.iter().enumerate() {
            let expected = if i % 2 == 0 {
                Finish::GrayMetal
            } else {
                Finish::DarkMetal
            };
            assert_eq!(*finish, expected);
        }
    }

    #[test]
    fn test_wings_are_mirrored() {
        let root = blueprint();
        let port = named(&root, "port wing")[0];
        let starboard = named(&root, "starboard wing")[0];
        assert_eq!(port.children.len(), starboard.children.len());
        for (a, b) in port.children.iter().zip(&starboard.children) {
            assert_eq!(a.transform.translation.x, -b.transform.translation.x);
            assert_eq!(a.transform.translation.z, b.transform.translation.z);
        }
    }

    #[test]
    fn test_tube_spans_endpoints() {
        let from = Vec3::new(0.1, 0.0, 0.0);
        let to = Vec3::new(0.1, 0.0, 0.1);
        let part = tube(from, to);
        let Some((PartShape::Cylinder { height, .. }, _)) = part.shape else {
            panic!("tube is not a cylinder");
        };
        assert!((height - 0.1).abs() < 1e-6);
        let axis = part.transform.rotation * Vec3::Y;
        assert!(axis.distance(Vec3::Z) < 1e-5);
        assert!(part.transform.translation.distance(Vec3::new(0.1, 0.0, 0.05)) < 1e-6);
    }

    #[test]
    fn test_lens_faces_forward() {
        let root = blueprint();
        let sensor = named(&root, "sensor")[0];
        let lens = &sensor.children[0];
        let normal = sensor.transform.rotation * lens.transform.rotation * Vec3::Z;
        assert!(normal.distance(Vec3::Z) < 1e-5);
    }

    #[test]
    fn test_dish_mesh_layout() {
        let mesh = dish_mesh(DISH_RADIUS, DISH_OPENING, 32, 12);
        assert_eq!(mesh.count_vertices(), 33 * 13);
        let triangles = mesh.indices().map_or(0, |indices| indices.len()) / 3;
        // Pole band contributes one triangle per sector, the others two
        assert_eq!(triangles, 32 + 32 * 11 * 2);
    }

    #[test]
    fn test_dish_vertices_on_cap() {
        let mesh = dish_mesh(1.0, DISH_OPENING, 16, 4);
        let Some(positions) = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|attr| attr.as_float3())
        else {
            panic!("missing positions");
        };
        for p in positions {
            let v = Vec3::from_array(*p);
            assert!((v.length() - 1.0).abs() < 1e-5);
            assert!(v.y >= DISH_OPENING.cos() - 1e-5);
        }
    }

    #[test]
    fn test_every_part_builds_a_mesh() {
        let root = blueprint();
        root.visit(&mut |part| {
            if let Some((shape, _)) = part.shape {
                assert!(shape.mesh().count_vertices() > 0, "{}", part.name);
            }
        });
    }
}
