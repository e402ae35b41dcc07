use serde_json::json;
use tabex_lib::column::Column;
use tabex_lib::model::Record;
use tabex_lib::resolve::searchable_fields;
use tabex_lib::search::{SearchMode, SearchState, filter_rows};

fn records(value: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}

fn name_columns() -> Vec<Column> {
    vec![
        Column::data("firstName").title("First Name").into(),
        Column::data("lastName").title("Last Name").into(),
    ]
}

#[test]
fn test_or_across_fields() {
    let rows = records(json!([
        {"firstName": "Ann", "lastName": "Lee"},
        {"firstName": "Bo", "lastName": "Lee"}
    ]));
    let fields = searchable_fields(&name_columns());

    let ann = filter_rows(&rows, &fields, "Ann", SearchMode::Exact);
    assert_eq!(ann, [&rows[0]]);
    assert_eq!(filter_rows(&rows, &fields, "Lee", SearchMode::Exact).len(), 2);
    assert_eq!(filter_rows(&rows, &fields, "", SearchMode::Exact).len(), 2);
}

#[test]
fn test_case_insensitive_substring() {
    let rows = records(json!([{"firstName": "Annabel"}, {"firstName": "Bo"}]));
    let fields = searchable_fields(&name_columns());
    assert_eq!(filter_rows(&rows, &fields, "NAB", SearchMode::Exact).len(), 1);
    assert!(filter_rows(&rows, &fields, "anb", SearchMode::Exact).is_empty());
}

#[test]
fn test_nested_path() {
    let rows = records(json!([
        {"contact": {"name": "pikachu"}},
        {"contact": {"name": "bulbasaur"}}
    ]));
    let columns: Vec<Column> = vec![Column::data(["contact", "name"]).into()];
    let fields = searchable_fields(&columns);
    let found = filter_rows(&rows, &fields, "pikachu", SearchMode::Exact);
    assert_eq!(found, [&rows[0]]);
}

#[test]
fn test_grouped_columns_are_searched() {
    let columns: Vec<Column> = serde_json::from_value(json!([
        {"title": "Company", "children": [
            {"title": "Address", "dataIndex": "companyAddress"},
            {"title": "Name", "dataIndex": "companyName"}
        ]}
    ]))
    .unwrap();
    let rows = records(json!([
        {"companyAddress": "Lake Park", "companyName": "SoftLake Co"},
        {"companyAddress": "Hill Road", "companyName": "Peak Ltd"}
    ]));
    let fields = searchable_fields(&columns);
    assert_eq!(filter_rows(&rows, &fields, "peak", SearchMode::Exact), [&rows[1]]);
}

#[test]
fn test_scalars_only() {
    let rows = records(json!([
        {"tags": ["lee"], "meta": {"lee": 1}, "note": null},
        {"age": 42, "active": true}
    ]));
    let columns: Vec<Column> = vec![
        Column::data("tags").into(),
        Column::data("meta").into(),
        Column::data("note").into(),
        Column::data("age").into(),
        Column::data("active").into(),
    ];
    let fields = searchable_fields(&columns);
    assert!(filter_rows(&rows, &fields, "lee", SearchMode::Exact).is_empty());
    assert!(filter_rows(&rows, &fields, "null", SearchMode::Exact).is_empty());
    assert_eq!(filter_rows(&rows, &fields, "42", SearchMode::Exact), [&rows[1]]);
    assert_eq!(filter_rows(&rows, &fields, "true", SearchMode::Exact), [&rows[1]]);
}

#[test]
fn test_fuzzy_is_looser_than_exact() {
    let rows = records(json!([{"firstName": "Pikachu"}, {"firstName": "Raichu"}]));
    let fields = searchable_fields(&name_columns());
    assert!(filter_rows(&rows, &fields, "pkc", SearchMode::Exact).is_empty());
    assert_eq!(filter_rows(&rows, &fields, "pkc", SearchMode::Fuzzy), [&rows[0]]);
    assert!(filter_rows(&rows, &fields, "xyz", SearchMode::Fuzzy).is_empty());
}

#[test]
fn test_fuzzy_words_must_match_one_field() {
    let rows = records(json!([
        {"firstName": "Pikachu"},
        {"firstName": "Poke", "lastName": "Chu"}
    ]));
    let fields = searchable_fields(&name_columns());
    assert_eq!(filter_rows(&rows, &fields, "pk ch", SearchMode::Fuzzy), [&rows[0]]);
    assert!(filter_rows(&rows, &fields, "pk ch", SearchMode::Exact).is_empty());
}

#[test]
fn test_filter_is_idempotent() {
    let rows = records(json!([
        {"firstName": "Ann", "lastName": "Lee"},
        {"firstName": "Bo", "lastName": "Kim"}
    ]));
    let fields = searchable_fields(&name_columns());
    let once: Vec<Record> = filter_rows(&rows, &fields, "lee", SearchMode::Exact)
        .into_iter()
        .cloned()
        .collect();
    let twice = filter_rows(&once, &fields, "lee", SearchMode::Exact);
    assert_eq!(twice.len(), once.len());
}

#[test]
fn test_query_persists_across_row_sets() {
    let fields = searchable_fields(&name_columns());
    let first = records(json!([
        {"firstName": "Ann", "lastName": "Lee"},
        {"firstName": "Bo", "lastName": "Kim"}
    ]));
    let second = records(json!([
        {"firstName": "Cy", "lastName": "Park"},
        {"firstName": "Di", "lastName": "Lee"},
        {"firstName": "Ed", "lastName": "Lee"}
    ]));

    let mut search = SearchState::new(SearchMode::Exact);
    search.set_query("Lee", &first, &fields);
    assert_eq!(search.visible(&first), [&first[0]]);

    search.refresh(&second, &fields);
    assert_eq!(search.query(), "Lee");
    assert_eq!(search.visible(&second), [&second[1], &second[2]]);
}
