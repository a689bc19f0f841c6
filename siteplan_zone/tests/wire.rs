// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload tests for `siteplan_zone::wire`.
//!
//! These check the JSON shapes seen by the collaborators: field aliases on
//! fetch, the `(y, x)` bounds transposition, and camelCase save bodies.

use serde_json::json;
use siteplan_zone::wire::{
    MapData, SaveAck, SaveZoneRequest, SaveZoneResponse, VertexUpdate, ZoneVertices,
};
use siteplan_zone::{MapId, Vertex, VertexId, ZoneId, ZoneLevel, close_ring};

#[test]
fn map_bounds_are_transposed() {
    let data: MapData = serde_json::from_value(json!({
        "imageRef": "maps/7/floor.png",
        "bounds": [[-40.0, -80.0], [160.0, 160.0]],
    }))
    .unwrap();
    assert_eq!(data.image_ref, "maps/7/floor.png");

    let b = data.world_bounds().unwrap();
    assert_eq!(b.min_x(), -80.0);
    assert_eq!(b.min_y(), -40.0);
    assert_eq!(b.max_x(), 160.0);
    assert_eq!(b.max_y(), 160.0);
}

#[test]
fn degenerate_map_bounds_are_an_error() {
    let data: MapData = serde_json::from_value(json!({
        "imageRef": "",
        "bounds": [[0.0, 5.0], [10.0, 5.0]],
    }))
    .unwrap();
    assert!(data.world_bounds().is_err());
}

#[test]
fn both_vertex_naming_schemes_are_accepted() {
    let fetched: ZoneVertices = serde_json::from_value(json!({
        "vertices": [
            { "vertex_id": 11, "n_x": 1.5, "n_y": 2.5, "n_z": 0.0, "n_ord": 2 },
            { "id": 10, "x": 0.5, "y": 0.25, "order": 1 },
            { "vertexId": 12, "x": 3.0, "y": 4.0, "z": 1.0, "order": 3 },
        ]
    }))
    .unwrap();

    let records = fetched.to_records();
    let ids: Vec<_> = records.iter().map(|(id, _)| *id).collect();
    assert_eq!(
        ids,
        vec![Some(VertexId(10)), Some(VertexId(11)), Some(VertexId(12))]
    );
    assert_eq!(records[1].1, Vertex::new(1.5, 2.5, 2));
    assert_eq!(records[2].1.z, 1.0);
}

#[test]
fn missing_fields_are_substituted_not_rejected() {
    let fetched: ZoneVertices = serde_json::from_value(json!({
        "vertices": [
            { "x": 1.0, "order": 1 },
            { "y": 2.0, "order": 2 },
            { "x": 3.0, "y": null, "order": 3 },
        ]
    }))
    .unwrap();
    let polygon = fetched.to_polygon("zone#3");
    let points: Vec<(f64, f64)> = polygon.vertices().iter().map(|v| (v.x, v.y)).collect();
    assert_eq!(points, vec![(1.0, 0.0), (0.0, 2.0), (3.0, 0.0)]);
}

#[test]
fn empty_vertex_payload_is_an_empty_polygon() {
    let fetched: ZoneVertices = serde_json::from_value(json!({})).unwrap();
    assert!(fetched.to_polygon("zone#4").is_empty());
}

#[test]
fn save_request_is_camel_case_and_closed() {
    let ring = close_ring(&[
        Vertex::new(0.0, 0.0, 1),
        Vertex::new(10.000_000_4, 0.0, 2),
        Vertex::new(10.0, 10.0, 3),
    ]);
    let req = SaveZoneRequest::new(
        "Server room",
        MapId(7),
        ZoneLevel::Room,
        Some(ZoneId(3)),
        &ring,
    );
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Server room",
            "mapId": 7,
            "level": "room",
            "parentZoneId": 3,
            "vertices": [
                { "x": 0.0, "y": 0.0, "z": 0.0, "order": 1 },
                { "x": 10.0, "y": 0.0, "z": 0.0, "order": 2 },
                { "x": 10.0, "y": 10.0, "z": 0.0, "order": 3 },
                { "x": 0.0, "y": 0.0, "z": 0.0, "order": 4 },
            ],
        })
    );
}

#[test]
fn absent_parent_is_sent_as_null() {
    let req = SaveZoneRequest::new("Campus", MapId(1), ZoneLevel::Campus, None, &[]);
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body["parentZoneId"], serde_json::Value::Null);
    assert_eq!(body["vertices"], json!([]));
}

#[test]
fn save_response_and_ack_parse() {
    let resp: SaveZoneResponse = serde_json::from_value(json!({ "zoneId": 42 })).unwrap();
    assert_eq!(resp.zone_id, ZoneId(42));
    let ack: SaveAck = serde_json::from_value(json!({ "status": "ok" })).unwrap();
    assert_eq!(ack, SaveAck::default());
}

#[test]
fn vertex_update_omits_unchanged_fields() {
    let mut update = VertexUpdate::new(VertexId(5));
    assert!(update.is_empty());
    update.y = Some(12.345_678_9);

    let body = serde_json::to_value(update.rounded()).unwrap();
    assert_eq!(body, json!({ "vertexId": 5, "y": 12.345_679 }));
}
