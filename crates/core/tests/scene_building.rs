//! Scene assembly from app-shaped data
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use space_view_core::{
    ConnectorKind, DetailPreset, LineStyle, Participant, Rgb, SceneConfig, SceneData, Triangle,
    TriangleSceneBuilder,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn people(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| Participant::new(format!("p{i}"), -60.0 + 25.0 * i as f64, -150.0 + 60.0 * i as f64))
        .collect()
}

#[test]
fn test_two_waiting_participants_get_one_dashed_arc() {
    let config = SceneConfig::default();
    let data = SceneData::new(people(2), Vec::new());
    let scene = TriangleSceneBuilder::new(&config).build(&data, &mut StdRng::seed_from_u64(1));

    assert_eq!(scene.markers.len(), 2);
    assert_eq!(scene.connectors.len(), 1);
    let pending = &scene.connectors[0];
    assert_eq!(pending.kind, ConnectorKind::Pending);
    assert!(matches!(
        pending.style,
        LineStyle::Dashed { color, .. } if color == Rgb::PENDING
    ));
    assert!(pending.line_distances.is_some());
    assert!(scene.particles.is_empty());
}

#[test]
fn test_one_or_three_waiting_get_no_pending_arc() {
    let config = SceneConfig::default();
    for n in [1, 3] {
        let data = SceneData::new(people(n), Vec::new());
        let scene = TriangleSceneBuilder::new(&config).build(&data, &mut StdRng::seed_from_u64(2));
        assert_eq!(scene.pending_connectors().count(), 0);
    }
}

#[test]
fn test_full_triangle_has_three_arcs_and_no_pending() {
    let config = SceneConfig::default();
    let members = people(3);
    let data = SceneData::new(members.clone(), vec![Triangle::new("#2196f3", members)]);
    let scene = TriangleSceneBuilder::new(&config).build(&data, &mut StdRng::seed_from_u64(3));

    assert_eq!(scene.triangle_connectors().count(), 3);
    assert_eq!(scene.pending_connectors().count(), 0);
    assert_eq!(scene.particles.len(), 3 * config.particles.per_arc);

    for connector in scene.triangle_connectors() {
        assert_eq!(connector.style.color(), Rgb::new(0x21, 0x96, 0xf3));
        assert_eq!(connector.vertices.len(), config.arcs.curve_divisions + 1);
    }
}

#[test]
fn test_four_member_triangle_closes_the_loop() {
    let config = SceneConfig::default();
    let members = people(4);
    let data = SceneData::new(members.clone(), vec![Triangle::new("#ffffff", members)]);
    let scene = TriangleSceneBuilder::new(&config).build(&data, &mut StdRng::seed_from_u64(4));

    let pairs: Vec<(&str, &str)> = scene
        .triangle_connectors()
        .map(|c| (c.from.as_str(), c.to.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("p0", "p1"), ("p1", "p2"), ("p2", "p3"), ("p3", "p0")]
    );
}

#[test]
fn test_particles_spread_evenly_along_each_arc() {
    let config = SceneConfig::with_preset(DetailPreset::Low);
    let members = people(3);
    let data = SceneData::new(members.clone(), vec![Triangle::new("#ff0000", members)]);
    let scene = TriangleSceneBuilder::new(&config).build(&data, &mut StdRng::seed_from_u64(5));

    let per_arc = config.particles.per_arc;
    for (i, particle) in scene.particles.iter().take(per_arc).enumerate() {
        assert_eq!(particle.connector, 0);
        assert_relative_eq!(particle.motion.t(), i as f64 / per_arc as f64, epsilon = 1e-12);
        assert!(particle.motion.speed() >= config.particles.speed_min);
        assert!(particle.motion.speed() < config.particles.speed_max);
    }
}

#[test]
fn test_same_seed_same_scene() {
    let config = SceneConfig::default();
    let members = people(3);
    let data = SceneData::new(members.clone(), vec![Triangle::new("#00ff00", members)]);
    let builder = TriangleSceneBuilder::new(&config);

    let a = builder.build(&data, &mut StdRng::seed_from_u64(99));
    let b = builder.build(&data, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

#[test]
fn test_app_json_drives_builder() {
    let json = r##"{
        "participants": [
            { "id": 1, "coordinates": [48.85, 2.35], "isCurrentUser": true },
            { "id": 2, "coordinates": [40.71, -74.0] },
            { "id": 3, "coordinates": [-33.87, 151.21] },
            { "id": 4, "coordinates": [35.68, 139.69] },
            { "id": 5, "coordinates": [55.75, 37.62] }
        ],
        "triangles": [
            { "color": "#9c27b0", "members": [
                { "id": 1, "coordinates": [48.85, 2.35] },
                { "id": 2, "coordinates": [40.71, -74.0] },
                { "id": 3, "coordinates": [-33.87, 151.21] }
            ] }
        ]
    }"##;
    let data = SceneData::from_json_str(json).unwrap();
    data.validate().unwrap();

    let config = SceneConfig::default();
    let scene = TriangleSceneBuilder::new(&config).build(&data, &mut StdRng::seed_from_u64(6));

    assert_eq!(scene.markers.len(), 5);
    assert_eq!(scene.triangle_connectors().count(), 3);
    assert_eq!(scene.pending_connectors().count(), 1);

    let me = &scene.markers[0];
    assert!(me.is_current_user);
    assert_eq!(me.color, Rgb::CURRENT_USER);
    assert_eq!(scene.markers[1].color, Rgb::PARTICIPANT);
}
