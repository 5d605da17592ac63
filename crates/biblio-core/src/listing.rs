//! # List View
//!
//! Client-side list management for every table in the dashboard: filter by
//! search text and category, stable sort by one field, then slice one page.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     compute_page(records, state, spec)                  │
//! │                                                                         │
//! │  records (as fetched) ──► 1. FILTER                                    │
//! │                              search_text ⊂ field(search_field)          │
//! │                              (case-insensitive substring)              │
//! │                              AND field(category_field) == category     │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                           2. STABLE SORT by sort_key / direction       │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                           3. SLICE [(page-1)*size, page*size)          │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                           PageResult { records, total_pages, page }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `records.len() <= page_size`
//! - `total_pages == ceil(filtered_count / page_size)`, so an empty result
//!   has `total_pages == 0`
//! - `current_page` is always within `[1, max(total_pages, 1)]`
//!
//! [`compute_page`] is the pure projection; [`ListViewController`] owns the
//! records and a [`ViewState`] and recomputes on demand. Nothing here can
//! fail: unknown sort keys fall back to the default and page numbers are
//! clamped.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeSet;

// =============================================================================
// Field Values
// =============================================================================

/// The value of one named field of a [`Record`].
///
/// ## Ordering
/// `Missing < Number < Text`. Numbers compare numerically, text
/// lexicographically (byte order, case-sensitive).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// The record has no such field, or it is null.
    Missing,
    /// Numeric field.
    Number(f64),
    /// Text field.
    Text(Cow<'a, str>),
}

impl<'a> FieldValue<'a> {
    /// Borrowed text value.
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    /// Owned text value, for fields derived on the fly.
    pub fn owned(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }

    /// Natural ordering between two values of the same field.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
            (FieldValue::Missing, _) => Ordering::Less,
            (_, FieldValue::Missing) => Ordering::Greater,
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
            (FieldValue::Text(a), FieldValue::Text(b)) => a.as_ref().cmp(b.as_ref()),
        }
    }

    /// Searchable text form of the value.
    fn search_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Missing => Cow::Borrowed(""),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(t) => Cow::Borrowed(t.as_ref()),
        }
    }

    /// Case-insensitive substring match. `needle` must already be lowercase.
    fn contains_lowercase(&self, needle: &str) -> bool {
        needle.is_empty() || self.search_text().to_lowercase().contains(needle)
    }

    /// Exact match against a category selection.
    fn equals_category(&self, category: &str) -> bool {
        match self {
            FieldValue::Missing => false,
            other => other.search_text() == category,
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// A row the list view can project.
///
/// Records are never mutated here; the view only reorders, filters and
/// slices references to them.
pub trait Record {
    /// Externally assigned unique identifier.
    fn id(&self) -> &str;

    /// Value of the named field, [`FieldValue::Missing`] for unknown names.
    fn field(&self, name: &str) -> FieldValue<'_>;
}

// =============================================================================
// Sort Direction
// =============================================================================

/// Sort direction for the active sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Short form used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Parses `asc`/`desc`; anything else is ascending.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// List Spec
// =============================================================================

/// Static description of one table: which fields are searched, filtered
/// and sortable, plus the fixed page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpec {
    /// Field matched against the search text. `None` disables search.
    pub search_field: Option<&'static str>,
    /// Field matched exactly against the category filter.
    pub category_field: Option<&'static str>,
    /// Fields the table can be sorted by.
    pub sort_keys: &'static [&'static str],
    /// Sort key used on view entry and for unknown keys.
    pub default_sort: &'static str,
    /// Records per page (always > 0).
    pub page_size: usize,
}

impl ListSpec {
    /// `/libros`: search by name, filter by genre.
    pub fn books(page_size: usize) -> Self {
        ListSpec {
            search_field: Some("name"),
            category_field: Some("genre"),
            sort_keys: &["name", "editorial", "author", "genre", "amountAvailable"],
            default_sort: "name",
            page_size: page_size.max(1),
        }
    }

    /// `/usuarios`: search by name, filter by role.
    pub fn users(page_size: usize) -> Self {
        ListSpec {
            search_field: Some("name"),
            category_field: Some("role"),
            sort_keys: &["name", "email", "role"],
            default_sort: "name",
            page_size: page_size.max(1),
        }
    }

    /// `/multas`: search by name, sort by name or amount.
    pub fn fines(page_size: usize) -> Self {
        ListSpec {
            search_field: Some("name"),
            category_field: None,
            sort_keys: &["name", "email", "multa"],
            default_sort: "name",
            page_size: page_size.max(1),
        }
    }

    /// `/devoluciones`: search by borrower, filter by pending/returned.
    pub fn rents(page_size: usize) -> Self {
        ListSpec {
            search_field: Some("user"),
            category_field: Some("status"),
            sort_keys: &["rentDate", "returnDate", "user", "copies", "status"],
            default_sort: "rentDate",
            page_size: page_size.max(1),
        }
    }

    /// Returns true if `key` is one of the sortable fields.
    pub fn is_sortable(&self, key: &str) -> bool {
        self.sort_keys.iter().any(|k| *k == key)
    }

    /// Maps unknown sort keys to the default key.
    pub fn resolve_sort_key<'k>(&self, key: &'k str) -> &'k str {
        if self.is_sortable(key) {
            key
        } else {
            self.default_sort
        }
    }
}

// =============================================================================
// View State
// =============================================================================

/// The user-controlled parameters of one table view.
///
/// Created with defaults on view entry, mutated by UI events, never
/// persisted. In the dashboard it round-trips through the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub category_filter: Option<String>,
    pub sort_key: String,
    pub sort_direction: SortDirection,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl ViewState {
    /// Default state for a table: no search, no category, default sort
    /// ascending, page 1.
    pub fn new(spec: &ListSpec) -> Self {
        ViewState {
            search_text: String::new(),
            category_filter: None,
            sort_key: spec.default_sort.to_string(),
            sort_direction: SortDirection::Ascending,
            page: 1,
            page_size: spec.page_size.max(1),
        }
    }

    /// Stores the search text and goes back to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    /// Stores the category selection and goes back to page 1.
    ///
    /// A blank selection clears the filter.
    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.category_filter = category.filter(|c| !c.trim().is_empty());
        self.page = 1;
    }

    /// Same key toggles direction; a new key sorts ascending.
    pub fn set_sort(&mut self, spec: &ListSpec, key: &str) {
        let key = spec.resolve_sort_key(key);
        if key == self.sort_key {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = key.to_string();
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Stores the page clamped into `[1, max(total_pages, 1)]`.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.page = clamp_page(page, total_pages);
    }

    /// Replaces an unknown sort key with the default and fixes a zero page
    /// or page size. Used when the state comes from outside (query string).
    pub fn normalized(mut self, spec: &ListSpec) -> Self {
        self.sort_key = spec.resolve_sort_key(&self.sort_key).to_string();
        self.page = self.page.max(1);
        self.page_size = self.page_size.max(1);
        self.category_filter = self.category_filter.filter(|c| !c.trim().is_empty());
        self
    }
}

// =============================================================================
// Page Result
// =============================================================================

/// One rendered page of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<'a, R> {
    /// At most `page_size` records, in display order.
    pub records: Vec<&'a R>,
    /// `ceil(filtered_count / page_size)`; zero when nothing matched.
    pub total_pages: usize,
    /// Clamped 1-based page number.
    pub current_page: usize,
    /// Number of records that passed the filters.
    pub filtered_count: usize,
}

impl<'a, R> PageResult<'a, R> {
    /// True when nothing matched the filters.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when a "previous" control should be enabled.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// True when a "next" control should be enabled.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// The page indicator shown under every table.
    pub fn indicator(&self) -> String {
        format!("Página {} de {}", self.current_page, self.total_pages)
    }
}

// =============================================================================
// Pure Projection
// =============================================================================

/// Number of pages needed for `count` records.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamps a page number into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Projects `records` through `state`: filter, stable sort, slice.
///
/// Pure and deterministic: the same inputs always give the same page.
pub fn compute_page<'a, R: Record>(
    records: &'a [R],
    state: &ViewState,
    spec: &ListSpec,
) -> PageResult<'a, R> {
    let mut filtered = filter_records(records, state, spec);

    let sort_key = spec.resolve_sort_key(&state.sort_key);
    let direction = state.sort_direction;
    // Vec::sort_by is stable: ties keep their fetched order.
    filtered.sort_by(|a, b| direction.apply(a.field(sort_key).compare(&b.field(sort_key))));

    let page_size = state.page_size.max(1);
    let filtered_count = filtered.len();
    let total_pages = total_pages(filtered_count, page_size);
    let current_page = clamp_page(state.page, total_pages);

    let records = filtered
        .into_iter()
        .skip((current_page - 1) * page_size)
        .take(page_size)
        .collect();

    PageResult {
        records,
        total_pages,
        current_page,
        filtered_count,
    }
}

fn filter_records<'a, R: Record>(records: &'a [R], state: &ViewState, spec: &ListSpec) -> Vec<&'a R> {
    let needle = state.search_text.trim().to_lowercase();
    let category = state
        .category_filter
        .as_deref()
        .filter(|c| !c.trim().is_empty());

    records
        .iter()
        .filter(|record| match spec.search_field {
            Some(field) => record.field(field).contains_lowercase(&needle),
            None => true,
        })
        .filter(|record| match (spec.category_field, category) {
            (Some(field), Some(category)) => record.field(field).equals_category(category),
            _ => true,
        })
        .collect()
}

// =============================================================================
// List View Controller
// =============================================================================

/// Stateful wrapper: owns the fetched records and the current
/// [`ViewState`], exposes the UI mutators and recomputes the page.
///
/// ## Usage
/// ```rust
/// use biblio_core::listing::{FieldValue, ListSpec, ListViewController, Record};
///
/// struct Row(&'static str, &'static str);
///
/// impl Record for Row {
///     fn id(&self) -> &str { self.0 }
///     fn field(&self, name: &str) -> FieldValue<'_> {
///         match name {
///             "name" => FieldValue::text(self.0),
///             "genre" => FieldValue::text(self.1),
///             _ => FieldValue::Missing,
///         }
///     }
/// }
///
/// let rows = vec![Row("B", "X"), Row("A", "Y"), Row("C", "X")];
/// let mut view = ListViewController::new(rows, ListSpec::books(2));
///
/// let page = view.compute_page();
/// assert_eq!(page.records.iter().map(|r| r.0).collect::<Vec<_>>(), ["A", "B"]);
/// assert_eq!(page.total_pages, 2);
///
/// view.set_category_filter(Some("X".into()));
/// assert_eq!(view.compute_page().total_pages, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ListViewController<R> {
    records: Vec<R>,
    spec: ListSpec,
    state: ViewState,
}

impl<R: Record> ListViewController<R> {
    /// Creates a controller in the default view state.
    pub fn new(records: Vec<R>, spec: ListSpec) -> Self {
        let state = ViewState::new(&spec);
        ListViewController {
            records,
            spec,
            state,
        }
    }

    /// Creates a controller resuming an existing view state (for example one
    /// decoded from a query string). The state is normalized and its page
    /// clamped against the records.
    pub fn with_state(records: Vec<R>, spec: ListSpec, state: ViewState) -> Self {
        let state = state.normalized(&spec);
        let mut controller = ListViewController {
            records,
            spec,
            state,
        };
        let page = controller.state.page;
        controller.set_page(page);
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn spec(&self) -> &ListSpec {
        &self.spec
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// See [`ViewState::set_search_text`].
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.set_search_text(text);
    }

    /// See [`ViewState::set_category_filter`].
    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.state.set_category_filter(category);
    }

    /// See [`ViewState::set_sort`].
    pub fn set_sort(&mut self, key: &str) {
        self.state.set_sort(&self.spec, key);
    }

    /// Moves to page `n`, clamped into `[1, max(total_pages, 1)]`.
    pub fn set_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.state.set_page(page, total);
    }

    /// Page count for the current filters.
    pub fn total_pages(&self) -> usize {
        let filtered = filter_records(&self.records, &self.state, &self.spec).len();
        total_pages(filtered, self.state.page_size)
    }

    /// Computes the visible page for the current state.
    pub fn compute_page(&self) -> PageResult<'_, R> {
        compute_page(&self.records, &self.state, &self.spec)
    }

    /// The view state a click on the `key` sort header leads to.
    pub fn state_after_sort(&self, key: &str) -> ViewState {
        let mut next = self.state.clone();
        next.set_sort(&self.spec, key);
        next
    }

    /// The view state a pagination control for page `page` leads to.
    pub fn state_for_page(&self, page: usize) -> ViewState {
        let mut next = self.state.clone();
        next.set_page(page, self.total_pages());
        next
    }

    /// Distinct non-empty values of the category field, sorted, for the
    /// filter dropdown.
    pub fn categories(&self) -> Vec<String> {
        let Some(field) = self.spec.category_field else {
            return Vec::new();
        };

        self.records
            .iter()
            .filter_map(|record| match record.field(field) {
                FieldValue::Missing => None,
                value => {
                    let text = value.search_text().trim().to_string();
                    (!text.is_empty()).then_some(text)
                }
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
