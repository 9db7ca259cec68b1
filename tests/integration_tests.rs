use concave::prelude::*;
use serde_json::json;

/// Integration tests for the projector, the tools and the stdio server.
/// These follow what a viewer host and a tool client actually do.
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn projector(camera: CameraState, aspect: f64) -> Projector {
        Projector::new(&camera, aspect, &ProjectionConfig::default())
    }

    /// Camera at the origin looking at a marker at the origin
    #[test]
    fn test_forward_marker_is_centered() {
        let projector = projector(CameraState::new(0.0, 0.0, 78.0), 1.6);
        let position = projector.project(&LatLng::new(0.0, 0.0)).unwrap();
        assert!((position.x_percent - 50.0).abs() < 1e-9);
        assert!((position.y_percent - 50.0).abs() < 1e-9);
        assert!((position.depth - 1.0).abs() < 1e-12);

        assert!(projector.project(&LatLng::new(0.0, 180.0)).is_none());
    }

    /// The camera's own direction is centered and its antipode hidden,
    /// wherever the camera points
    #[test]
    fn test_forward_and_antipode_everywhere() {
        for lat in [-89.5, -60.0, -10.0, 0.0, 33.3, 75.0, 89.5] {
            for lng in [-179.0, -90.0, 0.0, 45.0, 120.0, 180.0] {
                let camera = CameraState::new(lat, lng, 78.0);
                let projector = projector(camera, 1.6);
                let forward = camera.direction();

                let center = projector.project(&forward).unwrap();
                assert!((center.x_percent - 50.0).abs() < 1e-6, "{lat},{lng}");
                assert!((center.y_percent - 50.0).abs() < 1e-6, "{lat},{lng}");

                assert!(projector.project(&forward.antipode()).is_none(), "{lat},{lng}");
            }
        }
    }

    /// Markers come back farthest first and hidden markers are dropped
    #[test]
    fn test_visible_markers_depth_order() {
        let markers = vec![
            Marker::new("edge", "Edge", 0.0, 30.0),
            Marker::new("behind", "Behind", 0.0, 180.0),
            Marker::new("center", "Center", 0.0, 0.0),
            Marker::new("mid", "Mid", 0.0, 10.0),
        ];
        let projected = projector(CameraState::default(), 1.6).project_visible(&markers);
        let ids: Vec<_> = projected.iter().map(|p| p.marker_id.as_str()).collect();
        assert_eq!(ids, vec!["center", "mid", "edge"]);

        let depths: Vec<f64> = projected.iter().filter_map(|p| p.depth()).collect();
        assert!(depths.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    /// Drag, wheel and resize through the controller feed the projector
    #[test]
    fn test_controller_drives_projection() {
        let mut controller = CameraController::default();
        controller.handle_event(&InputEvent::Resize { width: 0.0, height: 0.0 });
        assert_eq!(controller.aspect(), 0.0);

        controller.handle_event(&InputEvent::Resize { width: 1000.0, height: 500.0 });
        controller.handle_event(&InputEvent::PointerDown { position: Point::new(100.0, 100.0) });
        controller.handle_event(&InputEvent::PointerMove { position: Point::new(0.0, 100.0) });
        controller.handle_event(&InputEvent::PointerUp);
        assert!((controller.camera().lng - 14.0).abs() < 1e-9);

        for _ in 0..100 {
            controller.handle_event(&InputEvent::Wheel { delta_y: 100.0 });
        }
        assert_eq!(controller.camera().fov, 108.0);

        let projector = projector(*controller.camera(), controller.aspect());
        let position = projector.project(&LatLng::new(0.0, 14.0)).unwrap();
        assert!((position.x_percent - 50.0).abs() < 1e-9);
    }

    /// Open the viewer with a focus, then look a marker up
    #[tokio::test]
    async fn test_open_then_lookup() {
        let registry = ToolRegistry::with_builtin_tools();
        let ctx = ToolContext::new();

        let opened = registry
            .call("open-concave-earth", json!({"focus": "Australia"}), &ctx)
            .await
            .unwrap();
        assert_eq!(opened.text, "Loaded 1 landmark nodes for concave view");
        let props: ViewerProps = serde_json::from_value(opened.widget.unwrap().props).unwrap();
        assert_eq!(props.markers[0].id, "greatbarrierreef");
        assert_eq!(props.camera.lat, -18.2871);

        let details = registry
            .call("get-landmark-details", json!({"id": "greatbarrierreef"}), &ctx)
            .await
            .unwrap();
        let landmark: Landmark = serde_json::from_value(details.structured_content.unwrap()).unwrap();
        assert_eq!(landmark.country, "Australia");
        assert_eq!(landmark.facts.len(), 2);
    }

    /// An external marker reusing a catalog id keeps its own details
    #[tokio::test]
    async fn test_external_id_collision_resolves_to_external_record() {
        let registry = ToolRegistry::with_builtin_tools();
        let ctx = ToolContext::new();
        registry
            .call(
                "open-concave-earth",
                json!({"markers": [{"id": "london", "name": "London, Ontario", "country": "Canada", "lat": 42.98, "lng": -81.25}]}),
                &ctx,
            )
            .await
            .unwrap();

        let details = registry
            .call("get-landmark-details", json!({"id": "london"}), &ctx)
            .await
            .unwrap();
        let landmark: Landmark = serde_json::from_value(details.structured_content.unwrap()).unwrap();
        assert_eq!(landmark.name, "London, Ontario");
        assert_eq!(landmark.country, "Canada");
        assert_eq!(landmark.lat, 42.98);
    }

    /// Unknown ids resolve to the sentinel record, not an error
    #[tokio::test]
    async fn test_unknown_lookup_sentinel() {
        let registry = ToolRegistry::with_builtin_tools();
        let details = registry
            .call("get-landmark-details", json!({"id": "x"}), &ToolContext::new())
            .await
            .unwrap();
        assert_eq!(
            details.structured_content.unwrap(),
            json!({
                "id": "x",
                "name": "Unknown location",
                "country": "Unknown",
                "type": "unknown",
                "lat": 0.0,
                "lng": 0.0,
                "facts": ["No landmark details found."]
            })
        );
    }

    /// A whole stdio exchange: initialize, list, call, notification
    #[tokio::test]
    async fn test_stdio_exchange() {
        let input = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": {
                    "name": "arduino-circuit-builder",
                    "arguments": {
                        "prompt": "Blink",
                        "filename": "blink.ino",
                        "code": "#define LED 13\nvoid setup() {}",
                        "diagramTitle": "LED"
                    }
                }
            }),
        ]
        .iter()
        .map(|message| message.to_string())
        .collect::<Vec<_>>()
        .join("\n");

        let server = McpServer::with_builtin_tools(ServerConfig::default());
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);

        assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");

        let tools = responses[1]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 3);
        assert_eq!(tools[0]["widget"]["invoking"], "Preparing the Earth interior...");
        assert_eq!(tools[1]["inputSchema"]["required"][0], "id");

        let call = &responses[2]["result"];
        assert_eq!(call["structuredContent"]["lines"][0][0]["kind"], "preprocessor");
        assert_eq!(call["_meta"]["widget"]["name"], "arduino-circuit-builder");
    }

    /// Base URL comes from MCP_URL when set
    #[test]
    fn test_server_config_lookup() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "MCP_URL").then(|| "https://concave.example".to_string())
        });
        assert_eq!(config.base_url, "https://concave.example");
        assert_eq!(ServerConfig::from_lookup(|_| None).base_url, "http://localhost:3000");
    }
}
