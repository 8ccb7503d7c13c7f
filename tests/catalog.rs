//! Catalog behaviour against custom engines and registries.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use diplo_variants::board::{
    parse_submission, GameState, Graph, IssuedOrder, Order, PhaseType, Province, ProvinceType, Season, Unit,
    ALL_ORDER_TYPES,
};
use diplo_variants::catalog::CatalogService;
use diplo_variants::config::Config;
use diplo_variants::engine::{OrderResult, Resolution, VariantEngine};
use diplo_variants::error::{CatalogError, EngineError, RegistryError};
use diplo_variants::registry::VariantRegistry;
use diplo_variants::render::ResolveRequest;
use diplo_variants::schedule::LaunchSchedule;
use diplo_variants::server::ApiServer;
use diplo_variants::variant::{Variant, VariantInfo};
use serde_json::json;
use tower::ServiceExt;

/// Engine that echoes its input and counts calls.
#[derive(Default)]
struct EchoEngine {
    fail_start: bool,
    resolves: AtomicUsize,
}

impl VariantEngine for EchoEngine {
    fn start(&self) -> Result<GameState, EngineError> {
        if self.fail_start {
            return Err(EngineError::InvalidState("no start position".into()));
        }
        let mut state = GameState::empty(2000, Season::Spring, PhaseType::Movement);
        state.set_sc_owner("home".into(), Some("Solo".into()));
        state.place_unit("home".into(), Unit::army("Solo"));
        Ok(state)
    }

    fn resolve(&self, mut state: GameState, orders: &[IssuedOrder]) -> Result<Resolution, EngineError> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        let results: BTreeMap<_, _> = orders
            .iter()
            .map(|order| {
                let result = match order.order {
                    Order::Hold => OrderResult::Succeeded,
                    _ => OrderResult::IllegalMove,
                };
                (order.province.clone(), result)
            })
            .collect();
        state.year += 1;
        state.phase_type = PhaseType::Retreat;
        state.set_sc_owner("home".into(), Some("Rival".into()));
        state.set_dislodged("away".into(), Unit::army("Rival"), Some("home".into()));
        Ok(Resolution { state, results })
    }

    fn svg_map(&self) -> Result<Cow<'static, [u8]>, EngineError> {
        Ok(Cow::Borrowed(b"<svg id=\"echo\"/>"))
    }
}

fn graph() -> Arc<Graph> {
    Arc::new(
        Graph::builder()
            .province("home", "Home", ProvinceType::Land, true, Some("Solo"))
            .province("away", "Away", ProvinceType::Land, false, None)
            .army("home", "away")
            .build()
            .unwrap(),
    )
}

fn variant(name: &str, engine: Arc<EchoEngine>) -> Variant {
    Variant::new(VariantInfo::new(name, &["Solo"]), graph(), engine).unwrap()
}

fn catalog(engines: &[(&str, Arc<EchoEngine>)], schedule: &[(&str, u32)]) -> CatalogService {
    let registry = VariantRegistry::new(engines.iter().map(|(name, engine)| variant(name, Arc::clone(engine)))).unwrap();
    CatalogService::new(registry, LaunchSchedule::new(schedule.iter().copied())).unwrap()
}

fn request(orders: serde_json::Value) -> ResolveRequest {
    serde_json::from_value(json!({
        "Year": 2000,
        "Season": "Spring",
        "Type": "Movement",
        "Units": {"home": {"Type": "Army", "Nation": "Solo"}},
        "Orders": orders
    }))
    .unwrap()
}

#[test]
fn visibility_is_monotonic_in_level() {
    let engine = Arc::new(EchoEngine::default());
    let catalog = catalog(
        &[("A", Arc::clone(&engine)), ("B", Arc::clone(&engine)), ("C", engine)],
        &[("B", 2), ("C", 5)],
    );

    let mut previous = 0;
    for level in 0..8 {
        let visible = catalog.list_variants(level).unwrap();
        assert!(visible.len() >= previous);
        previous = visible.len();
        for entry in &visible {
            let gate = catalog.schedule().level_for(entry.variant.name());
            assert!(gate <= level);
        }
    }
    assert_eq!(previous, 3);
    assert_eq!(catalog.html_api_level(), 5);
}

#[test]
fn listing_is_sorted_by_name() {
    let engine = Arc::new(EchoEngine::default());
    let catalog = catalog(
        &[("Zeta", Arc::clone(&engine)), ("Alpha", Arc::clone(&engine)), ("Mu", engine)],
        &[],
    );
    let names: Vec<_> = catalog
        .list_variants(0)
        .unwrap()
        .iter()
        .map(|v| v.variant.name().to_string())
        .collect();
    assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);
}

#[test]
fn duplicate_names_fail_registry() {
    let engine = Arc::new(EchoEngine::default());
    let err = VariantRegistry::new([variant("Twin", Arc::clone(&engine)), variant("Twin", engine)]).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateVariant(name) if name == "Twin"));
}

#[test]
fn start_is_repeatable() {
    let catalog = catalog(&[("Echo", Arc::new(EchoEngine::default()))], &[("Echo", 4)]);
    let first = catalog.start_variant("Echo").unwrap();
    let second = catalog.start_variant("Echo").unwrap();
    assert_eq!(first.start, second.start);
    assert_eq!(first.start.year, 2000);
}

#[test]
fn resolve_passes_orders_to_engine() {
    let engine = Arc::new(EchoEngine::default());
    let catalog = catalog(&[("Echo", Arc::clone(&engine))], &[]);

    let phase = catalog
        .resolve_variant("Echo", request(json!({"Solo": {"home": ["Hold"]}})))
        .unwrap();
    assert_eq!(phase.year, 2001);
    assert_eq!(phase.map, "Echo");
    assert_eq!(phase.resolutions.get("home"), Some(&OrderResult::Succeeded));
    assert_eq!(engine.resolves.load(Ordering::SeqCst), 1);
}

#[test]
fn resolved_phase_keeps_every_engine_field() {
    let engine = Arc::new(EchoEngine::default());
    let catalog = catalog(&[("Echo", Arc::clone(&engine))], &[]);
    let submitted = request(json!({"Solo": {"home": ["Move", "away"]}}));

    let (state, _) = submitted.clone().into_parts();
    let orders = parse_submission(&submitted.orders, &ALL_ORDER_TYPES).unwrap();
    let expected = engine.resolve(state, &orders).unwrap();

    let phase = catalog.resolve_variant("Echo", submitted).unwrap();
    assert_eq!(phase.year, expected.state.year);
    assert_eq!(phase.season, expected.state.season);
    assert_eq!(phase.phase_type, PhaseType::Retreat);
    assert_eq!(phase.supply_centers, expected.state.supply_centers);
    assert_eq!(phase.units, expected.state.units);
    assert_eq!(phase.dislodged, expected.state.dislodged);
    assert_eq!(phase.dislodgers, expected.state.dislodgers);
    assert_eq!(phase.dislodged.get("away"), Some(&Unit::army("Rival")));
    assert_eq!(phase.dislodgers.get("away"), Some(&Province::new("home")));
    assert_eq!(phase.resolutions, expected.results);
    assert_eq!(phase.resolutions.get("home"), Some(&OrderResult::IllegalMove));

    let wire = serde_json::to_value(&phase).unwrap();
    assert_eq!(wire["Dislodgeds"], json!({"away": {"Type": "Army", "Nation": "Rival"}}));
    assert_eq!(wire["Dislodgers"], json!({"away": "home"}));
    assert_eq!(wire["SCs"], json!({"home": "Rival"}));
}

#[test]
fn malformed_orders_never_reach_engine() {
    let engine = Arc::new(EchoEngine::default());
    let catalog = catalog(&[("Echo", Arc::clone(&engine))], &[]);

    for orders in [
        json!({"Solo": {"home": []}}),
        json!({"Solo": {"home": ["Move"]}}),
        json!({"Solo": {"nowhere": ["Hold"]}}),
    ] {
        let err = catalog.resolve_variant("Echo", request(orders)).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRequest(_)));
    }
    assert_eq!(engine.resolves.load(Ordering::SeqCst), 0);
}

#[test]
fn map_version_tracks_bytes() {
    let catalog = catalog(&[("Echo", Arc::new(EchoEngine::default()))], &[]);
    let map = catalog.variant_map("Echo").unwrap();
    assert_eq!(&*map.bytes, b"<svg id=\"echo\"/>");
    assert_eq!(map.version.len(), 64);
    assert!(map.matches(&map.etag()));
}

#[test]
fn failing_start_is_engine_error() {
    let broken = Arc::new(EchoEngine {
        fail_start: true,
        ..EchoEngine::default()
    });
    let catalog = catalog(&[("Broken", broken)], &[]);
    assert!(matches!(catalog.start_variant("Broken"), Err(CatalogError::Engine(_))));
    assert!(matches!(catalog.list_variants(0), Err(CatalogError::Engine(_))));
}

#[tokio::test]
async fn engine_failures_are_internal_errors() {
    let broken = Arc::new(EchoEngine {
        fail_start: true,
        ..EchoEngine::default()
    });
    let catalog = catalog(&[("Broken", broken)], &[]);
    let app = ApiServer::new(Config::default(), Arc::new(catalog)).router();

    let response = app
        .oneshot(Request::get("/Variant/Broken/Start").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Internal server error");
}
