use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::ir::BoardGraph;

use super::region::controller_side_centroid;
use super::size::RegionExtents;
use super::{DeviceLayout, Region, RegionBoxes};

/// Members of one region in placement order: sorted by the
/// controller-side pin centroid projected on the region's layout axis,
/// ties broken by input order (stable sort).
fn ordered_members(
    graph: &BoardGraph,
    order: &[String],
    devices: &BTreeMap<String, DeviceLayout>,
    region: Region,
) -> Vec<String> {
    let mut members: Vec<(f32, String)> = order
        .iter()
        .filter(|id| devices.get(*id).is_some_and(|d| d.region == region))
        .map(|id| {
            let (cx, cy) = controller_side_centroid(graph, id);
            let key = if region.stacks_vertically() { cy } else { cx };
            (key, id.clone())
        })
        .collect();
    members.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    members.into_iter().map(|(_, id)| id).collect()
}

/// Walks each region's sorted members and assigns absolute centroids.
/// The running offset starts at the band's centering value; the Left
/// region reserves its label band before each device, the other
/// regions carry it in the running size.
pub(super) fn assign_coordinates(
    graph: &BoardGraph,
    order: &[String],
    devices: &mut BTreeMap<String, DeviceLayout>,
    extents: &RegionExtents,
    boxes: &RegionBoxes,
    total_height: f32,
    config: &LayoutConfig,
) {
    let gap = config.device_gap;
    let label = config.label_height;

    // Left: vertical stack, label band above each device.
    let members = ordered_members(graph, order, devices, Region::Left);
    if !members.is_empty() {
        let extent = extents.left;
        let cx = extent.device_band / 2.0;
        let mut offset = (total_height - extent.height) / 2.0;
        for id in &members {
            let label_y = offset + label / 2.0;
            offset += label;
            let device = devices.get_mut(id).expect("member has layout state");
            device.cx = cx;
            device.cy = offset + device.size.height / 2.0;
            device.label_anchor = Some((cx, label_y));
            offset += device.size.height + gap;
        }
    }

    // Right: vertical stack, label band below each device.
    let members = ordered_members(graph, order, devices, Region::Right);
    if !members.is_empty() {
        let extent = extents.right;
        let cx = boxes.right.x + config.horizontal_margin + extent.device_band / 2.0;
        let mut offset = (total_height - extent.height) / 2.0;
        for id in &members {
            let device = devices.get_mut(id).expect("member has layout state");
            device.cx = cx;
            device.cy = offset + device.size.height / 2.0;
            device.label_anchor =
                Some((cx, offset + device.size.height + label / 2.0));
            offset += device.size.height + label + gap;
        }
    }

    // TopMid: horizontal stack above the controller.
    let members = ordered_members(graph, order, devices, Region::TopMid);
    if !members.is_empty() {
        let extent = extents.top;
        let cy = extent.device_band / 2.0;
        let label_y = extent.device_band + label / 2.0;
        let mut offset = boxes.top.x + (boxes.top.width - extent.width) / 2.0;
        for id in &members {
            let device = devices.get_mut(id).expect("member has layout state");
            device.cy = cy;
            device.cx = offset + device.size.width / 2.0;
            device.label_anchor = Some((device.cx, label_y));
            offset += device.size.width + gap;
        }
    }

    // BottomMid: horizontal stack below the controller, margin first.
    let members = ordered_members(graph, order, devices, Region::BottomMid);
    if !members.is_empty() {
        let extent = extents.bottom;
        let device_top = boxes.bottom.y + config.vertical_margin;
        let cy = device_top + extent.device_band / 2.0;
        let label_y = device_top + extent.device_band + label / 2.0;
        let mut offset = boxes.bottom.x + (boxes.bottom.width - extent.width) / 2.0;
        for id in &members {
            let device = devices.get_mut(id).expect("member has layout state");
            device.cy = cy;
            device.cx = offset + device.size.width / 2.0;
            device.label_anchor = Some((device.cx, label_y));
            offset += device.size.width + gap;
        }
    }

    // The controller's centroid is simply its band's center.
    if let Some(controller) = devices.get_mut(&graph.controller.id) {
        controller.cx = boxes.controller.x + boxes.controller.width / 2.0;
        controller.cy = boxes.controller.y + boxes.controller.height / 2.0;
    }
}
