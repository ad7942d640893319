//! End-to-end frame rendering through the public API.

use std::sync::Arc;

use bezier_shade::{
    Background, FrameComposer, ImageSource, LightState, Mesh, PointD, RenderConfig,
    RenderingBuffer, Rgba8, SceneSnapshot, ShadingParams,
};

fn scene(light: PointD, kd: f64, ks: f64, m: f64) -> SceneSnapshot {
    SceneSnapshot::new(
        LightState::new(light, 100.0, Rgba8::WHITE),
        ShadingParams::new(kd, ks, m),
    )
}

fn shaded(mesh: &Mesh, scene: &SceneSnapshot) -> RenderingBuffer {
    let buf = RenderingBuffer::new(mesh.raster_width(), mesh.raster_height());
    FrameComposer::new().fill_triangles(&buf, mesh, scene);
    buf
}

#[test]
fn flat_two_by_two_mesh_lit_from_above() {
    let mesh = Mesh::new(2, 1, 100, 100).unwrap();
    let buf = shaded(&mesh, &scene(PointD::new(50.0, 50.0), 0.5, 0.0, 1.0));
    let c = buf.pixel(50, 50);
    assert_eq!((c.r, c.g, c.b, c.a), (127, 127, 127, 255));
}

#[test]
fn specular_highlight_peaks_under_light() {
    let mesh = Mesh::new(4, 4, 120, 120).unwrap();
    let buf = shaded(&mesh, &scene(PointD::new(60.0, 60.0), 0.0, 1.0, 20.0));
    assert_eq!(buf.pixel(60, 60).r, 255);
    assert!(buf.pixel(10, 10).r < buf.pixel(50, 50).r);
}

#[test]
fn raised_control_point_changes_shading() {
    let mut mesh = Mesh::new(4, 3, 90, 90).unwrap();
    let s = scene(PointD::new(45.0, 45.0), 1.0, 0.0, 1.0);
    let flat = shaded(&mesh, &s);

    mesh.pick(PointD::new(31.0, 29.0)).unwrap();
    assert!(mesh.set_selected_height(150.0));
    let bumped = shaded(&mesh, &s);

    let differing = (0..90)
        .flat_map(|y| (0..90).map(move |x| (x, y)))
        .filter(|&(x, y)| flat.pixel(x, y) != bumped.pixel(x, y))
        .count();
    assert!(differing > 90 * 90 / 4, "only {} pixels changed", differing);
}

#[test]
fn background_image_tints_output() {
    let mesh = Mesh::new(2, 2, 40, 40).unwrap();
    let mut s = scene(PointD::new(20.0, 20.0), 1.0, 0.0, 1.0);
    let red = Arc::new(ImageSource::solid(8, 8, Rgba8::new(255, 0, 0, 255)).unwrap());
    s.background = Background::with_image(Rgba8::WHITE, red);

    let buf = shaded(&mesh, &s);
    let c = buf.pixel(20, 20);
    assert_eq!((c.r, c.g, c.b), (255, 0, 0));

    s.background.use_image = false;
    let buf = shaded(&mesh, &s);
    let c = buf.pixel(20, 20);
    assert_eq!((c.r, c.g, c.b), (255, 255, 255));
}

#[test]
fn neutral_normal_map_leaves_flat_surface_lit() {
    let mesh = Mesh::new(2, 1, 32, 32).unwrap();
    let mut s = scene(PointD::new(16.0, 16.0), 1.0, 0.0, 1.0);
    // The map's z lifts the surface by a full height unit.
    s.light.height = 300.0;
    // (128, 128, 255) decodes to roughly +Z.
    let map = ImageSource::solid(4, 4, Rgba8::new(128, 128, 255, 255)).unwrap();
    s.normal_map = Some(Arc::new(map));
    let c = shaded(&mesh, &s).pixel(16, 16);
    assert!(c.r >= 250, "got {:?}", c);
}

#[test]
fn default_config_renders_full_frame() {
    let config = RenderConfig::default();
    let mesh = config.mesh().unwrap();
    let mut scene = config.scene();
    scene.show_mesh = true;
    let frame = FrameComposer::new().render(&mesh, &scene);
    assert_eq!((frame.width(), frame.height()), (600, 600));
    assert_eq!(frame.pixel(0, 300), Rgba8::WHITE);
    assert_eq!(frame.pixel(300, 300), Rgba8::YELLOW);
    assert_eq!(frame.to_rgba_bytes().len(), 600 * 600 * 4);
}
