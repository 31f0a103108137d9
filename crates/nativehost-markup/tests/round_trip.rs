use nativehost_core::{Environment, HostContext, MemoryTree, Raw};
use nativehost_markup::{render, MarkupEnvironment};
use nativehost_testing::prelude::*;

fn build(markup: &str) -> (TestHost, NodeId) {
    let (mut host, sink) = test_host();
    let env: Environment<MemoryTree> = Environment::new();
    let root = env
        .raw(&mut host, Raw::Markup(markup.into()), HostContext::default())
        .unwrap();
    assert!(sink.is_empty(), "{:?}", sink.diagnostics());
    (host, root)
}

#[test]
fn parsed_markup_renders_back() {
    let markup = r#"<stackLayout><label text="a &lt; b"/><button isEnabled>Go</button></stackLayout>"#;
    let (host, root) = build(markup);
    assert_eq!(
        render(host.tree(), root).unwrap(),
        r#"<stackLayout><label text="a &lt; b"></label><button isEnabled>Go</button></stackLayout>"#
    );
}

#[test]
fn void_tags_apply_to_live_trees() {
    let (host, root) = build("<wrapLayout><image src='x.png'/><label/></wrapLayout>");
    let env = MarkupEnvironment::new().with_void_tags(["image"]);
    assert_eq!(
        env.render(host.tree(), root).unwrap(),
        "<wrapLayout><image src=\"x.png\"><label></label></wrapLayout>"
    );
}

#[test]
fn reconciled_updates_show_in_markup() {
    let (mut host, root) = build("<stackLayout><label/></stackLayout>");
    let label = children_of(&host, root)[0];
    host.reconcile_children(root, &[Child::from("before"), Child::Node(label), Child::from("&")]);
    assert_eq!(
        render(host.tree(), root).unwrap(),
        "<stackLayout>before<label></label>&amp;</stackLayout>"
    );
}
