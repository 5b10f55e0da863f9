use {
    crate::{Collapsed, Error, Flat, FlatValue, ValueFlattenExt, collapsed_csv::write::CsvWriterEnableCollapseExt, flatten},
    anyhow::{Context, Result},
    serde::Serialize,
    serde_json::{Value, json},
    tap::Pipe,
    tracing::info,
};

fn nested_obj() -> Value {
    json!({
        "a": 1,
        "b": true,
        "c": {
            "d": null,
            "e": {
                "f": "hello world"
            }
        }
    })
}

fn nested_arr() -> Value {
    json!([1, 2, [3, [[4], [5, 6]]]])
}

fn flattened_value(value: Value) -> Result<Value> {
    value
        .flattened()
        .with_context(|| "flattening".to_string())
        .map(Value::from)
        .map(|flat| {
            info!(%flat);
            flat
        })
}

#[test_log::test]
fn test_null_is_unsupported() {
    assert!(matches!(
        flatten(Value::Null),
        Err(Error::UnsupportedInput { kind: "null", value: Value::Null })
    ));
}

#[test_log::test]
fn test_nested_object() -> Result<()> {
    flattened_value(nested_obj()).map(|got| assert_eq!(got, json!({"a": 1, "b": true, "d": null, "f": "hello world"})))
}

#[test_log::test]
fn test_nested_array_inside_object() -> Result<()> {
    nested_obj()
        .pipe(|mut obj| {
            obj.as_object_mut()
                .context("fixture is an object")
                .map(|map| map.insert("arr".into(), json!([1, [2, [3, [4]]]])))
                .map(|_| obj)
        })
        .and_then(flattened_value)
        .map(|got| {
            assert_eq!(
                got,
                json!({"a": 1, "b": true, "d": null, "f": "hello world", "arr": [1, 2, 3, 4]})
            )
        })
}

#[test_log::test]
fn test_nested_array() -> Result<()> {
    flattened_value(nested_arr()).map(|got| assert_eq!(got, json!([1, 2, 3, 4, 5, 6])))
}

#[test_log::test]
fn test_nested_object_inside_array() -> Result<()> {
    nested_arr()
        .pipe(|mut arr| {
            arr.as_array_mut()
                .context("fixture is an array")
                .map(|values| values.push(json!([7, {"hello": "world!", "ok": {"fine": true}}])))
                .map(|()| arr)
        })
        .and_then(flattened_value)
        .map(|got| assert_eq!(got, json!([1, 2, 3, 4, 5, 6, 7, "world!", true])))
}

#[test]
fn test_input_shape_is_kept() -> Result<()> {
    anyhow::ensure!(matches!(nested_obj().flattened()?, Flat::Map(_)));
    anyhow::ensure!(matches!(nested_arr().flattened()?, Flat::Sequence(_)));
    Ok(())
}

#[test]
fn test_flat_values_are_typed() -> Result<()> {
    json!({"list": [1, {"inner": [2]}], "k": "v"})
        .flattened()?
        .into_map()
        .map_err(|other| anyhow::anyhow!("expected a map, got {other:?}"))
        .and_then(|map| {
            let list = map.get("list").and_then(FlatValue::as_sequence).context("list")?;
            anyhow::ensure!(list.len() == 2, "got {list:?}");
            anyhow::ensure!(list.get(1).and_then(FlatValue::as_sequence).is_some());
            anyhow::ensure!(map.get("k").and_then(FlatValue::as_scalar).is_some());
            Ok(())
        })
}

#[derive(Serialize, Debug, Clone)]
struct Child {
    field_1: bool,
    field_2: i32,
}

#[derive(Serialize, Debug, Clone)]
struct Parent {
    id: u32,
    child: Child,
    history: Vec<Vec<i32>>,
}

const PARENT: Parent = Parent {
    id: 1,
    child: Child {
        field_1: true,
        field_2: 0,
    },
    history: Vec::new(),
};

#[test_log::test]
fn test_csv_and_serde_agree() -> Result<()> {
    let parents = [
        PARENT,
        Parent {
            id: 2,
            history: vec![vec![1], vec![2, 3]],
            ..PARENT
        },
    ];
    let rows = csv::WriterBuilder::new()
        .from_writer(Vec::new())
        .enable_collapse()
        .pipe(|mut w| {
            parents
                .iter()
                .try_for_each(|p| w.serialize(p))
                .context("serializing")
                .and_then(|()| w.into_inner().context("dropping writer"))
        })
        .and_then(|buffer| String::from_utf8(buffer).context("utf-8"))?;
    info!(%rows);
    assert_eq!(rows, "id,field_1,field_2,history\n1,true,0,[]\n2,true,0,\"[1,2,3]\"\n");

    let collapsed = serde_json::to_value(Collapsed(&parents[1])).context("serializing collapsed")?;
    assert_eq!(collapsed, json!({"id": 2, "field_1": true, "field_2": 0, "history": [1, 2, 3]}));
    Ok(())
}
