#![cfg(not(target_arch = "wasm32"))]

use folio::{
    application::{
        archive::{ArchiveController, ArchiveState, Effect},
        settings::{PagerSettings, Selectors},
        sidebar::{EntryOffset, ScrollMetrics},
    },
    domain::{
        articles::ArticleList,
        sections::ActiveItem,
        types::{ArticleId, PageNumber},
    },
    infra::html::scan_archive,
    presentation::report::PlanReport,
};

const ARCHIVE: &str = include_str!("fixtures/archive.html");

fn controller() -> ArchiveController {
    let scan = scan_archive(ARCHIVE, &Selectors::default()).expect("fixture scans");
    assert!(scan.missing_landmarks().is_empty());
    let articles = ArticleList::new(scan.articles).expect("unique ids");
    ArchiveController::new(articles, &PagerSettings::default()).expect("non-empty archive")
}

fn page(n: u32) -> PageNumber {
    PageNumber::new(n).expect("page")
}

#[test]
fn seven_articles_split_three_three_one() {
    let controller = controller();
    let paginator = controller.paginator();
    assert_eq!(paginator.page_count(), 3);

    let labels: Vec<_> = controller
        .controls()
        .into_iter()
        .map(|control| control.label)
        .collect();
    assert_eq!(labels, vec!["1", "2", "3"]);

    let sizes: Vec<_> = (1..=3)
        .map(|n| paginator.activate(page(n)).expect("page exists").shown().count())
        .collect();
    assert_eq!(sizes, vec![3, 3, 1]);
}

#[test]
fn last_page_plan_matches_snapshot() {
    let controller = controller();
    let transition = controller.on_load(Some("#!/3"));
    let report = PlanReport::from_transition(
        "archive.html",
        controller.paginator(),
        &transition,
        Vec::new(),
    )
    .expect("page activated");

    insta::assert_snapshot!(report.to_string(), @r"
    source: archive.html
    articles: 7, pages: 3
    page 3 (#!/3)

    controls: 1 2 [3]

    articles:
      hidden      static-sites  Why static sites
      hidden      feeds         Feeds & readers
      hidden      fragments     Routing with fragments
      hidden      sidebars      Sticky sidebars
      hidden      scroll-spy    Scroll spying
      hidden      typography    Typography notes
      shown last  colophon      Colophon

    sidebar:
      articles-sidebar-item-colophon  Colophon
    ");
}

#[test]
fn exactly_one_control_is_active() {
    let controller = controller();
    for n in 1..=3 {
        let transition = controller
            .on_control_click(ArchiveState::default(), page(n))
            .expect("page exists");
        let report =
            PlanReport::from_transition("archive.html", controller.paginator(), &transition, Vec::new())
                .expect("page activated");
        let active: Vec<_> = report
            .controls
            .iter()
            .filter(|control| control.active)
            .map(|control| control.page)
            .collect();
        assert_eq!(active, vec![page(n)]);
    }
}

#[test]
fn clicked_page_round_trips_through_fragment() {
    let controller = controller();
    let loaded = controller.on_load(None);
    assert_eq!(loaded.state.active_page, Some(page(1)));

    let clicked = controller
        .on_control_click(loaded.state, page(2))
        .expect("page exists");
    assert!(clicked.effects.contains(&Effect::WriteFragment {
        fragment: "!/2".to_string()
    }));

    let observed = controller.on_fragment(clicked.state.clone(), Some("#!/2"));
    assert!(observed.effects.is_empty());
    assert_eq!(observed.state, clicked.state);
}

#[test]
fn out_of_range_fragment_does_not_activate() {
    let controller = controller();
    let loaded = controller.on_load(Some("#!/2"));
    let ignored = controller.on_fragment(loaded.state, Some("#!/99"));
    assert!(ignored.effects.is_empty());
    assert_eq!(ignored.state.active_page, Some(page(2)));

    let fresh = controller.on_load(Some("#!/99"));
    assert_eq!(fresh.activated(), Some(page(1)));
}

#[test]
fn reaching_the_bottom_highlights_the_sentinel() {
    let controller = controller();
    let loaded = controller.on_load(None);
    let offsets: Vec<_> = ["static-sites", "feeds", "fragments"]
        .into_iter()
        .enumerate()
        .map(|(index, id)| EntryOffset {
            article: ArticleId::new(id).expect("id"),
            article_top: 100.0 + index as f64 * 900.0,
            heading_top: 120.0 + index as f64 * 900.0,
        })
        .collect();

    let reading = controller.on_scroll(
        loaded.state,
        &ScrollMetrics::new(1_100.0, 800.0, 3_200.0),
        &offsets,
    );
    assert_eq!(
        reading.state.active_item.article().map(|id| id.as_str()),
        Some("feeds")
    );

    let bottom = controller.on_scroll(
        reading.state,
        &ScrollMetrics::new(2_385.0, 800.0, 3_200.0),
        &offsets,
    );
    assert_eq!(bottom.state.active_item, ActiveItem::Bottom);
}
