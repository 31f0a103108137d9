use super::*;
use crate::diagnostics::DiagnosticSink;
use crate::{memory_host, MemoryHost};
use std::cell::RefCell;

#[derive(Default)]
struct Collected(RefCell<Vec<Diagnostic>>);

impl DiagnosticSink for Collected {
    fn report(&self, diagnostic: &Diagnostic) {
        self.0.borrow_mut().push(diagnostic.clone());
    }
}

fn host() -> (MemoryHost, Rc<Collected>) {
    let sink = Rc::new(Collected::default());
    let host = memory_host().with_diagnostics(sink.clone());
    (host, sink)
}

fn create(host: &mut MemoryHost, kind: NodeKind) -> NodeId {
    host.tree_mut().create(kind, "test")
}

#[test]
fn route_table_is_first_match_wins() {
    use NodeKind::*;
    let stack = Layout(LayoutKind::Stack);

    assert_eq!(Route::resolve(stack, Page), Route::RejectPage);
    assert_eq!(Route::resolve(Page, ActionBar), Route::PageActionBar);
    assert_eq!(Route::resolve(Page, stack), Route::Content);
    assert_eq!(Route::resolve(ScrollView, ActionBar), Route::Content);
    assert_eq!(Route::resolve(stack, ActionItem), Route::Ordered);
    assert_eq!(Route::resolve(ActionBar, NavigationButton), Route::NavigationButton);
    assert_eq!(Route::resolve(ActionBar, ActionItem), Route::ActionItem);
    assert_eq!(Route::resolve(ActionBar, TextBase), Route::TitleView);
    assert_eq!(Route::resolve(NavigationButton, TextBase), Route::ActionView);
    assert_eq!(Route::resolve(ActionItem, stack), Route::ActionView);
    assert_eq!(Route::resolve(TabView, TabViewItem), Route::TabItem);
    assert_eq!(Route::resolve(TabView, TextBase), Route::Generic);
    assert_eq!(Route::resolve(TabViewItem, stack), Route::TabItemView);
    assert_eq!(Route::resolve(FormattedString, Span), Route::Generic);
}

#[test]
fn single_slot_container_keeps_only_latest_child() {
    let (mut host, _) = host();
    let content = create(&mut host, NodeKind::ContentView);
    let first = create(&mut host, NodeKind::TextBase);
    let second = create(&mut host, NodeKind::TextBase);

    assert_eq!(host.attach(content, first), Outcome::Applied(Route::Content));
    assert_eq!(host.attach(content, second), Outcome::Applied(Route::Content));

    assert_eq!(host.children(content).unwrap(), vec![second]);
}

#[test]
fn detaching_content_clears_the_slot() {
    let (mut host, sink) = host();
    let scroll = create(&mut host, NodeKind::ScrollView);
    let child = create(&mut host, NodeKind::Layout(LayoutKind::Stack));
    let stranger = create(&mut host, NodeKind::Leaf);

    host.attach(scroll, child);
    assert_eq!(host.detach(scroll, stranger), Outcome::Skipped);
    assert_eq!(host.children(scroll).unwrap(), vec![child]);
    assert!(matches!(
        sink.0.borrow().last(),
        Some(Diagnostic::SlotMismatch { occupant: Some(o), .. }) if *o == child
    ));

    assert!(host.detach(scroll, child).is_applied());
    assert_eq!(host.tree().slot(scroll, Slot::Content).unwrap(), None);
}

#[test]
fn page_is_never_a_child() {
    let (mut host, sink) = host();
    let stack = create(&mut host, NodeKind::Layout(LayoutKind::Stack));
    let page = create(&mut host, NodeKind::Page);

    assert_eq!(host.attach(stack, page), Outcome::Skipped);
    assert_eq!(host.detach(stack, page), Outcome::Skipped);
    assert!(host.children(stack).unwrap().is_empty());
    assert_eq!(
        sink.0.borrow().as_slice(),
        &[
            Diagnostic::PageAsChild {
                op: Operation::Attach,
                parent: stack,
                child: page,
            },
            Diagnostic::PageAsChild {
                op: Operation::Detach,
                parent: stack,
                child: page,
            },
        ]
    );
}

#[test]
fn page_keeps_its_action_bar() {
    let (mut host, sink) = host();
    let page = create(&mut host, NodeKind::Page);
    let bar = create(&mut host, NodeKind::ActionBar);
    let body = create(&mut host, NodeKind::Layout(LayoutKind::Stack));

    assert_eq!(host.attach(page, bar), Outcome::Applied(Route::PageActionBar));
    assert_eq!(host.attach(page, body), Outcome::Applied(Route::Content));
    assert_eq!(host.children(page).unwrap(), vec![bar, body]);

    assert_eq!(host.detach(page, bar), Outcome::Skipped);
    assert_eq!(host.tree().slot(page, Slot::ActionBar).unwrap(), Some(bar));
    assert_eq!(
        sink.0.borrow().last(),
        Some(&Diagnostic::ForbiddenDetach {
            parent: page,
            child: bar,
        })
    );
}

#[test]
fn action_bar_routes_by_child_kind() {
    let (mut host, _) = host();
    let bar = create(&mut host, NodeKind::ActionBar);
    let nav = create(&mut host, NodeKind::NavigationButton);
    let item = create(&mut host, NodeKind::ActionItem);
    let title = create(&mut host, NodeKind::TextBase);

    host.attach(bar, nav);
    host.attach(bar, item);
    host.attach(bar, title);

    let tree = host.tree();
    assert_eq!(tree.slot(bar, Slot::NavigationButton).unwrap(), Some(nav));
    assert_eq!(tree.slot(bar, Slot::TitleView).unwrap(), Some(title));
    assert_eq!(tree.action_items(bar).unwrap(), vec![item]);

    host.detach(bar, nav);
    host.detach(bar, item);
    host.detach(bar, title);
    assert!(host.children(bar).unwrap().is_empty());
}

#[test]
fn action_item_holds_an_action_view() {
    let (mut host, _) = host();
    let nav = create(&mut host, NodeKind::NavigationButton);
    let view = create(&mut host, NodeKind::Leaf);

    assert_eq!(host.attach(nav, view), Outcome::Applied(Route::ActionView));
    assert_eq!(host.tree().slot(nav, Slot::ActionView).unwrap(), Some(view));
    assert!(host.detach(nav, view).is_applied());
    assert_eq!(host.tree().slot(nav, Slot::ActionView).unwrap(), None);
}

#[test]
fn tab_items_are_replaced_not_mutated() {
    let (mut host, _) = host();
    let tabs = create(&mut host, NodeKind::TabView);
    let first = create(&mut host, NodeKind::TabViewItem);
    let second = create(&mut host, NodeKind::TabViewItem);

    host.attach(tabs, first);
    let before = host.tree().tab_items(tabs).unwrap().expect("items set");
    host.attach(tabs, second);
    let after = host.tree().tab_items(tabs).unwrap().expect("items set");

    assert!(!Rc::ptr_eq(&before, &after));
    assert_eq!(&*before, &[first]);
    assert_eq!(&*after, &[first, second]);

    host.detach(tabs, first);
    let filtered = host.tree().tab_items(tabs).unwrap().expect("items set");
    assert!(!Rc::ptr_eq(&after, &filtered));
    assert_eq!(&*filtered, &[second]);
}

#[test]
fn tab_view_item_view_cannot_be_detached() {
    let (mut host, sink) = host();
    let item = create(&mut host, NodeKind::TabViewItem);
    let view = create(&mut host, NodeKind::Layout(LayoutKind::Grid));

    assert!(host.attach(item, view).is_applied());
    assert_eq!(host.detach(item, view), Outcome::Skipped);
    assert_eq!(host.tree().slot(item, Slot::ItemView).unwrap(), Some(view));
    assert!(matches!(
        sink.0.borrow().last(),
        Some(Diagnostic::UnsupportedDetach { .. })
    ));
}

#[test]
fn unrecognized_pairs_use_generic_views() {
    let (mut host, _) = host();
    let formatted = create(&mut host, NodeKind::FormattedString);
    let span = create(&mut host, NodeKind::Span);

    assert_eq!(host.attach(formatted, span), Outcome::Applied(Route::Generic));
    assert_eq!(host.tree().views(formatted).unwrap(), vec![span]);
    assert!(host.detach(formatted, span).is_applied());
    assert!(host.tree().views(formatted).unwrap().is_empty());
}

#[test]
fn absent_parent_is_a_reported_no_op() {
    let (mut host, sink) = host();
    let child = create(&mut host, NodeKind::Leaf);

    assert_eq!(host.attach(None::<NodeId>, child), Outcome::Skipped);
    assert_eq!(host.detach(None::<NodeId>, child), Outcome::Skipped);
    assert_eq!(
        sink.0.borrow()[0],
        Diagnostic::DetachedParent {
            op: Operation::Attach,
            child,
        }
    );
}

#[test]
fn missing_parent_is_absorbed() {
    let (mut host, sink) = host();
    let child = create(&mut host, NodeKind::Leaf);

    assert_eq!(host.attach(99, child), Outcome::Skipped);
    assert_eq!(
        sink.0.borrow()[0],
        Diagnostic::Node {
            op: Operation::Attach,
            error: NodeError::Missing { id: 99 },
        }
    );
}

#[test]
fn attach_before_inserts_at_anchor() {
    let (mut host, _) = host();
    let stack = create(&mut host, NodeKind::Layout(LayoutKind::Stack));
    let a = create(&mut host, NodeKind::Leaf);
    let b = create(&mut host, NodeKind::Leaf);
    let c = create(&mut host, NodeKind::Leaf);

    host.attach(stack, a);
    host.attach(stack, c);
    assert_eq!(host.attach_before(stack, b, c), Outcome::Applied(Route::Ordered));
    assert_eq!(host.children(stack).unwrap(), vec![a, b, c]);
}

#[test]
fn attach_before_moves_existing_member() {
    let (mut host, _) = host();
    let stack = create(&mut host, NodeKind::Layout(LayoutKind::Stack));
    let a = create(&mut host, NodeKind::Leaf);
    let b = create(&mut host, NodeKind::Leaf);
    let c = create(&mut host, NodeKind::Leaf);
    for id in [a, b, c] {
        host.attach(stack, id);
    }

    host.attach_before(stack, c, a);
    assert_eq!(host.children(stack).unwrap(), vec![c, a, b]);
    host.attach_before(stack, a, b);
    assert_eq!(host.children(stack).unwrap(), vec![c, a, b]);
}

#[test]
fn attach_before_unattached_anchor_appends() {
    let (mut host, _) = host();
    let stack = create(&mut host, NodeKind::Layout(LayoutKind::Flexbox));
    let a = create(&mut host, NodeKind::Leaf);
    let b = create(&mut host, NodeKind::Leaf);
    let floating = create(&mut host, NodeKind::Leaf);

    host.attach(stack, a);
    host.attach_before(stack, b, floating);
    assert_eq!(host.children(stack).unwrap(), vec![a, b]);
}

#[test]
fn attach_before_degrades_outside_layouts() {
    let (mut host, sink) = host();
    let bar = create(&mut host, NodeKind::ActionBar);
    let first = create(&mut host, NodeKind::ActionItem);
    let second = create(&mut host, NodeKind::ActionItem);

    host.attach(bar, first);
    assert_eq!(
        host.attach_before(bar, second, first),
        Outcome::Applied(Route::ActionItem)
    );
    assert_eq!(host.tree().action_items(bar).unwrap(), vec![first, second]);
    assert!(matches!(
        sink.0.borrow().last(),
        Some(Diagnostic::OrderIgnored { parent_kind: NodeKind::ActionBar, .. })
    ));
}

#[test]
fn grid_insertion_is_flagged() {
    let (mut host, sink) = host();
    let grid = create(&mut host, NodeKind::Layout(LayoutKind::Grid));
    let a = create(&mut host, NodeKind::Leaf);
    let b = create(&mut host, NodeKind::Leaf);

    host.attach(grid, a);
    host.attach_before(grid, b, a);
    assert_eq!(host.children(grid).unwrap(), vec![b, a]);
    assert_eq!(
        sink.0.borrow().as_slice(),
        &[Diagnostic::UntestedGridInsert {
            parent: grid,
            child: b,
        }]
    );
}

#[test]
fn slot_swaps_before_an_anchor_are_not_reported() {
    let (mut host, sink) = host();
    let content = create(&mut host, NodeKind::ContentView);
    let first = create(&mut host, NodeKind::Leaf);
    let second = create(&mut host, NodeKind::Leaf);

    host.attach(content, first);
    assert_eq!(
        host.attach_before(content, second, first),
        Outcome::Applied(Route::Content)
    );
    assert_eq!(host.children(content).unwrap(), vec![second]);
    assert!(sink.0.borrow().is_empty());
}
