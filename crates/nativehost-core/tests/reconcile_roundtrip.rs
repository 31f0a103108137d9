use nativehost_core::{HostTree, LayoutKind, NodeId};
use nativehost_testing::prelude::*;
use proptest::prelude::*;

const POOL: usize = 6;

#[derive(Clone, Debug)]
enum Entry {
    Node(usize),
    Text(String),
}

fn entries() -> impl Strategy<Value = Vec<Entry>> {
    let entry = prop_oneof![
        3 => (0..POOL).prop_map(Entry::Node),
        1 => "[a-c]{1,2}".prop_map(Entry::Text),
    ];
    prop::collection::vec(entry, 0..10).prop_map(|entries| {
        let mut seen = [false; POOL];
        entries
            .into_iter()
            .filter(|entry| match entry {
                Entry::Node(index) => !std::mem::replace(&mut seen[*index], true),
                Entry::Text(_) => true,
            })
            .collect()
    })
}

fn resolve(entries: &[Entry], pool: &[NodeId]) -> Vec<Child> {
    entries
        .iter()
        .map(|entry| match entry {
            Entry::Node(index) => Child::Node(pool[*index]),
            Entry::Text(value) => Child::Text(value.clone()),
        })
        .collect()
}

fn observed(host: &TestHost, parent: NodeId) -> Vec<Child> {
    children_of(host, parent)
        .into_iter()
        .map(|id| match host.tree().text(id).unwrap() {
            Some(value) => Child::Text(value),
            None => Child::Node(id),
        })
        .collect()
}

proptest! {
    #[test]
    fn live_children_match_the_new_list(old in entries(), new in entries()) {
        let (mut host, sink) = test_host();
        let parent = node(&mut host, NodeKind::Layout(LayoutKind::Stack));
        let pool = leaves(&mut host, POOL);

        let old = resolve(&old, &pool);
        let new = resolve(&new, &pool);
        host.reconcile_children(parent, &old);
        prop_assert_eq!(observed(&host, parent), old);

        host.reconcile_children(parent, &new);
        prop_assert_eq!(observed(&host, parent), new.clone());

        prop_assert_eq!(host.reconcile_children(parent, &new), 0);
        prop_assert_eq!(observed(&host, parent), new);
        prop_assert!(sink.is_empty());
    }

    #[test]
    fn removed_nodes_are_orphaned(old in entries(), new in entries()) {
        let (mut host, _) = test_host();
        let parent = node(&mut host, NodeKind::Layout(LayoutKind::Stack));
        let pool = leaves(&mut host, POOL);

        host.reconcile_children(parent, &resolve(&old, &pool));
        host.reconcile_children(parent, &resolve(&new, &pool));

        let live = children_of(&host, parent);
        for id in pool {
            let parent_of = host.tree().widget(id).unwrap().parent();
            prop_assert_eq!(parent_of == Some(parent), live.contains(&id));
        }
    }

    #[test]
    fn unordered_parent_settles_in_one_pass(old in entries(), new in entries()) {
        let (mut host, sink) = test_host();
        let parent = node(&mut host, NodeKind::Container);
        let pool = leaves(&mut host, POOL);

        host.reconcile_children(parent, &resolve(&old, &pool));
        let new = resolve(&new, &pool);
        host.reconcile_children(parent, &new);
        let size = host.tree().len();

        let mut expected = new.iter().map(|child| format!("{child:?}")).collect::<Vec<_>>();
        let mut actual = observed(&host, parent)
            .iter()
            .map(|child| format!("{child:?}"))
            .collect::<Vec<_>>();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);

        sink.take();
        prop_assert_eq!(host.reconcile_children(parent, &new), 0);
        prop_assert_eq!(host.tree().len(), size);
        prop_assert!(sink.is_empty());
    }
}
