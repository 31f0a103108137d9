//! The closed catalogue of widget kinds the host knows how to attach.

/// Flavour of an ordered layout container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Stack,
    Grid,
    Flexbox,
    Dock,
    Absolute,
    Wrap,
}

/// Runtime kind of a node in the target tree.
///
/// Attachment is dispatched on the `(parent, child)` pair of kinds, so every
/// widget the host constructs maps onto exactly one of these variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root. Holds one content view plus an optional action bar.
    Page,
    /// Single-slot container.
    ContentView,
    /// Single-slot container that scrolls its content.
    ScrollView,
    /// Ordered child collection with positional insertion.
    Layout(LayoutKind),
    ActionBar,
    ActionItem,
    NavigationButton,
    TabView,
    TabViewItem,
    /// Label, button, text field and text view.
    TextBase,
    FormattedString,
    Span,
    /// Generic container reached only through the add/remove view primitives.
    Container,
    /// Text node created for a text child entry.
    Text,
    Leaf,
}

impl NodeKind {
    /// Looks up the kind for a tag name. Unknown tags return `None` and are
    /// left to the environment's default constructor.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag.to_ascii_lowercase().as_str() {
            "page" => Self::Page,
            "contentview" => Self::ContentView,
            "scrollview" => Self::ScrollView,
            "stacklayout" => Self::Layout(LayoutKind::Stack),
            "gridlayout" => Self::Layout(LayoutKind::Grid),
            "flexboxlayout" => Self::Layout(LayoutKind::Flexbox),
            "docklayout" => Self::Layout(LayoutKind::Dock),
            "absolutelayout" => Self::Layout(LayoutKind::Absolute),
            "wraplayout" => Self::Layout(LayoutKind::Wrap),
            "actionbar" => Self::ActionBar,
            "actionitem" => Self::ActionItem,
            "navigationbutton" => Self::NavigationButton,
            "tabview" => Self::TabView,
            "tabviewitem" => Self::TabViewItem,
            "label" | "button" | "textfield" | "textview" => Self::TextBase,
            "formattedstring" => Self::FormattedString,
            "span" => Self::Span,
            "proxyviewcontainer" => Self::Container,
            "image" | "switch" | "slider" | "activityindicator" | "progress" | "htmlview"
            | "webview" | "listpicker" | "datepicker" | "timepicker" | "searchbar"
            | "segmentedbar" | "listview" | "placeholder" => Self::Leaf,
            _ => return None,
        };
        Some(kind)
    }

    /// Containers designed to hold exactly one child in their content slot.
    pub fn is_single_slot(self) -> bool {
        matches!(self, Self::Page | Self::ContentView | Self::ScrollView)
    }

    pub fn is_layout(self) -> bool {
        matches!(self, Self::Layout(_))
    }

    /// Action items and navigation buttons share the same action-view slot.
    pub fn is_action_item(self) -> bool {
        matches!(self, Self::ActionItem | Self::NavigationButton)
    }

    pub fn is_text_like(self) -> bool {
        matches!(self, Self::TextBase | Self::FormattedString | Self::Span)
    }
}

/// Named single-occupant attachment positions on a parent node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Content of a page, content view or scroll view.
    Content,
    /// Action bar of a page.
    ActionBar,
    /// Title view of an action bar.
    TitleView,
    /// Navigation button of an action bar.
    NavigationButton,
    /// Action view of an action item or navigation button.
    ActionView,
    /// View of a tab view item.
    ItemView,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Content,
        Slot::ActionBar,
        Slot::TitleView,
        Slot::NavigationButton,
        Slot::ActionView,
        Slot::ItemView,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}
