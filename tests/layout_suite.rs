use boardwire::config::LayoutConfig;
use boardwire::ir::{BoardGraph, Connection, Device, Pin, PinRole, Size, WireKind};
use boardwire::layout::{Region, compute_layout};
use boardwire::render::{DrawOp, emit_draw_ops};
use boardwire::theme::Theme;

fn pin(name: &str, x: f32, y: f32, role: PinRole) -> Pin {
    Pin {
        name: name.to_string(),
        x,
        y,
        role,
    }
}

fn device(id: &str, width: f32, height: f32, pins: Vec<Pin>) -> Device {
    Device {
        id: id.to_string(),
        label: id.to_string(),
        footprint: Size::new(width, height),
        pins,
        needs_rail: false,
        integrated: false,
        asset: Some(format!("{id}.png")),
    }
}

fn single_wire(provider: &str, provider_pin: &str, consumer: &str, consumer_pin: &str) -> Connection {
    Connection {
        provider: provider.to_string(),
        provider_pins: vec![provider_pin.to_string()],
        consumer: consumer.to_string(),
        consumer_pins: vec![consumer_pin.to_string()],
        wire: WireKind::Single,
        roles: Vec::new(),
        colors: Vec::new(),
    }
}

/// Scenario A: a 100x60 controller feeding one peripheral from pins
/// that average to 10% of the controller width. The peripheral lands
/// in the Left region and its centroid stays clear of the margin band
/// next to the controller.
#[test]
fn scenario_left_peripheral() {
    let controller = device(
        "mcu",
        100.0,
        60.0,
        vec![
            pin("a", 8.0, 20.0, PinRole::Signal),
            pin("b", 12.0, 40.0, PinRole::Signal),
        ],
    );
    let sensor = device(
        "sensor",
        30.0,
        24.0,
        vec![
            pin("s1", 30.0, 8.0, PinRole::Signal),
            pin("s2", 30.0, 16.0, PinRole::Signal),
        ],
    );
    let mut graph = BoardGraph::new(controller);
    graph.peripherals.push(sensor);
    graph.connections.push(Connection {
        provider: "mcu".to_string(),
        provider_pins: vec!["a".to_string(), "b".to_string()],
        consumer: "sensor".to_string(),
        consumer_pins: vec!["s1".to_string(), "s2".to_string()],
        wire: WireKind::Ribbon,
        roles: Vec::new(),
        colors: Vec::new(),
    });

    let config = LayoutConfig::default();
    let layout = compute_layout(&graph, &Theme::classic(), &config).unwrap();

    let sensor_layout = layout.device("sensor").unwrap();
    assert_eq!(sensor_layout.region, Region::Left);
    assert!(
        sensor_layout.cx < layout.regions.left.width - config.horizontal_margin,
        "centroid {} must stay left of the margin band",
        sensor_layout.cx
    );
    // Connector pins face the sensor's right edge, so no rotation is
    // needed for a Left-region device.
    assert_eq!(sensor_layout.rotation.degrees(), 0);
}

/// Scenario B: two top-row devices of widths 20 and 30 with the stock
/// gap of 30 and margin of 80 produce a region exactly 80 wide and
/// max-height + margin + label tall.
#[test]
fn scenario_top_row_sizing() {
    let controller = device(
        "mcu",
        100.0,
        60.0,
        vec![
            pin("t1", 40.0, 4.0, PinRole::Signal),
            pin("t2", 60.0, 4.0, PinRole::Signal),
        ],
    );
    let small = device("small", 20.0, 18.0, vec![pin("in", 10.0, 18.0, PinRole::Signal)]);
    let wide = device("wide", 30.0, 26.0, vec![pin("in", 15.0, 26.0, PinRole::Signal)]);
    let mut graph = BoardGraph::new(controller);
    graph.peripherals.push(small);
    graph.peripherals.push(wide);
    graph.connections.push(single_wire("mcu", "t1", "small", "in"));
    graph.connections.push(single_wire("mcu", "t2", "wide", "in"));

    let config = LayoutConfig::default();
    let layout = compute_layout(&graph, &Theme::classic(), &config).unwrap();

    assert_eq!(layout.device("small").unwrap().region, Region::TopMid);
    assert_eq!(layout.device("wide").unwrap().region, Region::TopMid);
    assert_eq!(layout.regions.top.width, 100.0); // middle column >= controller
    // The occupied content is 20 + 30 + 30 = 80 wide.
    let small_layout = layout.device("small").unwrap();
    let wide_layout = layout.device("wide").unwrap();
    let span = (wide_layout.cx + wide_layout.size.width / 2.0)
        .max(small_layout.cx + small_layout.size.width / 2.0)
        - (wide_layout.cx - wide_layout.size.width / 2.0)
            .min(small_layout.cx - small_layout.size.width / 2.0);
    assert!((span - 80.0).abs() < 1e-4);
    // Region height = max(h1, h2) + vertical margin + label band.
    assert_eq!(
        layout.regions.top.height,
        26.0 + config.vertical_margin + config.label_height
    );
}

/// A breadboard graph: rail devices take slots, the controller gets
/// one jumper per rail, and every emitted op set is identical across
/// repeated passes over the same snapshot.
#[test]
fn breadboard_rails_and_determinism() {
    let controller = device(
        "mcu",
        100.0,
        60.0,
        vec![
            pin("5v", 4.0, 4.0, PinRole::Power),
            pin("gnd", 4.0, 12.0, PinRole::Ground),
            pin("d0", 96.0, 30.0, PinRole::Signal),
            pin("d1", 96.0, 40.0, PinRole::Signal),
        ],
    );
    let mut led = device(
        "led",
        16.0,
        16.0,
        vec![
            pin("vcc", 4.0, 16.0, PinRole::Power),
            pin("k", 12.0, 16.0, PinRole::Ground),
        ],
    );
    led.needs_rail = true;
    let mut buzzer = device(
        "buzzer",
        20.0,
        20.0,
        vec![
            pin("vcc", 6.0, 20.0, PinRole::Power),
            pin("gnd", 14.0, 20.0, PinRole::Ground),
        ],
    );
    buzzer.needs_rail = true;
    let screen = device(
        "screen",
        40.0,
        30.0,
        vec![
            pin("a", 0.0, 10.0, PinRole::Signal),
            pin("b", 0.0, 20.0, PinRole::Signal),
        ],
    );

    let mut graph = BoardGraph::new(controller);
    graph.peripherals.push(led);
    graph.peripherals.push(buzzer);
    graph.peripherals.push(screen);
    graph.connections.push(Connection {
        provider: "mcu".to_string(),
        provider_pins: vec!["d0".to_string(), "d1".to_string()],
        consumer: "screen".to_string(),
        consumer_pins: vec!["a".to_string(), "b".to_string()],
        wire: WireKind::Bus,
        roles: Vec::new(),
        colors: Vec::new(),
    });

    let config = LayoutConfig::default();
    let theme = Theme::classic();
    assert!(graph.uses_rails());
    let layout = compute_layout(&graph, &theme, &config).unwrap();

    assert_eq!(layout.device("led").unwrap().region, Region::Rail);
    assert_eq!(layout.device("buzzer").unwrap().region, Region::Rail);
    assert_eq!(layout.device("screen").unwrap().region, Region::Right);

    let rails = layout.rails.as_ref().expect("rail layout present");
    // Controller power + ground jumpers, then two per rail device.
    assert_eq!(rails.jumpers.len(), 6);
    let mut power_slots: Vec<u16> = rails
        .jumpers
        .iter()
        .filter(|j| matches!(j.rail, boardwire::layout::RailKind::Power))
        .map(|j| j.slot)
        .collect();
    power_slots.sort_unstable();
    power_slots.dedup();
    assert_eq!(power_slots.len(), 3, "power slots must be distinct");
    for slot in &power_slots {
        assert!(!config.rail.reserved.contains(slot));
    }

    // The breadboard band extends the canvas below the regions.
    assert!(layout.height > layout.regions.left.height);

    let ops_a = emit_draw_ops(&graph, &layout, &theme, &config).unwrap();
    let layout_b = compute_layout(&graph, &theme, &config).unwrap();
    let ops_b = emit_draw_ops(&graph, &layout_b, &theme, &config).unwrap();
    assert_eq!(ops_a, ops_b);

    let straight_wires = ops_a
        .iter()
        .filter(|op| matches!(op, DrawOp::DrawStraightWire { .. }))
        .count();
    assert_eq!(straight_wires, 6);
}

/// Peripherals on every side of the controller at once: regions do not
/// overlap and every placed device stays inside the canvas.
#[test]
fn four_sided_board_stays_inside_canvas() {
    let controller = device(
        "mcu",
        120.0,
        80.0,
        vec![
            pin("l", 4.0, 40.0, PinRole::Signal),
            pin("r", 116.0, 40.0, PinRole::Signal),
            pin("t", 60.0, 4.0, PinRole::Signal),
            pin("b", 60.0, 76.0, PinRole::Signal),
        ],
    );
    let mut graph = BoardGraph::new(controller);
    for (id, controller_pin, pin_x, pin_y) in [
        ("west", "l", 28.0, 11.0),
        ("east", "r", 0.0, 11.0),
        ("north", "t", 14.0, 22.0),
        ("south", "b", 14.0, 0.0),
    ] {
        graph.peripherals.push(device(
            id,
            28.0,
            22.0,
            vec![pin("in", pin_x, pin_y, PinRole::Signal)],
        ));
        graph
            .connections
            .push(single_wire("mcu", controller_pin, id, "in"));
    }

    let config = LayoutConfig::default();
    let layout = compute_layout(&graph, &Theme::modern(), &config).unwrap();

    assert_eq!(layout.device("west").unwrap().region, Region::Left);
    assert_eq!(layout.device("east").unwrap().region, Region::Right);
    assert_eq!(layout.device("north").unwrap().region, Region::TopMid);
    assert_eq!(layout.device("south").unwrap().region, Region::BottomMid);

    for state in layout.devices.values() {
        let half_w = state.size.width / 2.0;
        let half_h = state.size.height / 2.0;
        assert!(state.cx - half_w >= -1e-4, "{} off the left edge", state.id);
        assert!(state.cy - half_h >= -1e-4, "{} off the top edge", state.id);
        assert!(
            state.cx + half_w <= layout.width + 1e-4,
            "{} off the right edge",
            state.id
        );
        assert!(
            state.cy + half_h <= layout.height + 1e-4,
            "{} off the bottom edge",
            state.id
        );
    }

    // Every signal wire was routed.
    assert_eq!(layout.wires.len(), 4);
}

/// Devices whose connector pins face away from the controller get
/// turned so the pins face it after placement.
#[test]
fn rotation_flips_wrong_facing_devices() {
    let controller = device(
        "mcu",
        100.0,
        60.0,
        vec![pin("l", 4.0, 30.0, PinRole::Signal)],
    );
    // Connector pins on the LEFT edge of a Left-region device face
    // away from the controller; the resolver must flip it 180.
    let backwards = device(
        "backwards",
        30.0,
        20.0,
        vec![pin("in", 0.0, 10.0, PinRole::Signal)],
    );
    let mut graph = BoardGraph::new(controller);
    graph.peripherals.push(backwards);
    graph.connections.push(single_wire("mcu", "l", "backwards", "in"));

    let layout = compute_layout(&graph, &Theme::classic(), &LayoutConfig::default()).unwrap();
    let state = layout.device("backwards").unwrap();
    assert_eq!(state.region, Region::Left);
    assert_eq!(state.rotation.degrees(), 180);
    // A half turn keeps the footprint extents.
    assert_eq!(state.size.width, 30.0);
    assert_eq!(state.size.height, 20.0);

    // After the flip the pin lands on the controller-facing side of
    // the device: its canvas x is right of the device centroid.
    let pin_pos = state.pin_position((0.0, 10.0));
    assert!(pin_pos.0 > state.cx);
    // The inverse mapping recovers the local offset.
    let local = state.pin_local(pin_pos);
    assert!((local.0 - 0.0).abs() < 1e-4 && (local.1 - 10.0).abs() < 1e-4);
}
