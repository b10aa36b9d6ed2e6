//! Integration tests for the XML to JSON mapping rules

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use xmlconv::{convert_xml, convert_xml_with_config, ConversionConfig};

fn convert_to_value(xml: &str) -> Value {
    let output = convert_xml(xml).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn test_root_element_becomes_single_top_level_key() {
    let value = convert_to_value("<config><name>demo</name></config>");
    let map = value.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("config"));
}

#[test]
fn test_repeated_siblings_collect_in_document_order() {
    let value = convert_to_value(
        "<catalog><item>first</item><item>second</item><item>third</item></catalog>",
    );
    assert_eq!(
        value,
        json!({"catalog": {"item": ["first", "second", "third"]}})
    );
}

#[test]
fn test_attribute_and_child_do_not_collide() {
    let value = convert_to_value(r#"<a x="1"><b>2</b></a>"#);
    assert_eq!(value, json!({"a": {"@x": "1", "b": "2"}}));
}

#[test]
fn test_attribute_colliding_tag_name_stays_distinct() {
    let value = convert_to_value(r#"<a b="attr"><b>child</b></a>"#);
    assert_eq!(value, json!({"a": {"@b": "attr", "b": "child"}}));
}

#[test]
fn test_empty_element_is_null() {
    assert_eq!(convert_to_value("<a/>"), json!({"a": null}));
    assert_eq!(convert_to_value("<a></a>"), json!({"a": null}));
}

#[test]
fn test_leaf_text_is_plain_string() {
    assert_eq!(convert_to_value("<a>hello</a>"), json!({"a": "hello"}));
}

#[test]
fn test_text_with_attributes_uses_sentinel_key() {
    let value = convert_to_value(r#"<note lang="en">hi there</note>"#);
    assert_eq!(value, json!({"note": {"@lang": "en", "#text": "hi there"}}));
}

#[test]
fn test_mixed_content_accumulates_under_sentinel() {
    let value = convert_to_value("<p>before<b>bold</b>after</p>");
    assert_eq!(value, json!({"p": {"b": "bold", "#text": "beforeafter"}}));
}

#[test]
fn test_cdata_and_entities() {
    let value = convert_to_value("<a><![CDATA[1 < 2]]></a>");
    assert_eq!(value, json!({"a": "1 < 2"}));

    let value = convert_to_value(r#"<a x="q&quot;q">x &amp; y</a>"#);
    assert_eq!(value, json!({"a": {"@x": "q\"q", "#text": "x & y"}}));
}

#[test]
fn test_values_are_not_coerced() {
    let value = convert_to_value("<r><n>42</n><f>true</f><e>null</e></r>");
    assert_eq!(value, json!({"r": {"n": "42", "f": "true", "e": "null"}}));
}

#[test]
fn test_pretty_output_is_two_space_indented() {
    let output = convert_xml("<a><b>1</b></a>").unwrap();
    assert_eq!(output, "{\n  \"a\": {\n    \"b\": \"1\"\n  }\n}");
}

#[test]
fn test_key_order_follows_document_order() {
    let output = convert_xml("<r><zebra>1</zebra><apple>2</apple><mango>3</mango></r>").unwrap();
    let zebra = output.find("zebra").unwrap();
    let apple = output.find("apple").unwrap();
    let mango = output.find("mango").unwrap();
    assert!(zebra < apple && apple < mango);
}

#[test]
fn test_custom_convention_is_reflected_in_output() {
    let config = ConversionConfig::default()
        .with_attribute_prefix("$")
        .with_text_key("_value");
    let output = convert_xml_with_config(r#"<a x="1">hi</a>"#, &config).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value, json!({"a": {"$x": "1", "_value": "hi"}}));
}

#[test]
fn test_round_trip_structural_fidelity() {
    let xml = r#"
        <library name="central">
            <book id="1">
                <title>First</title>
                <tags><tag>old</tag><tag>rare</tag></tags>
            </book>
            <book id="2">
                <title>Second</title>
                <tags><tag>new</tag></tags>
            </book>
            <open/>
        </library>
    "#;
    let value = convert_to_value(xml);
    assert_eq!(
        value,
        json!({
            "library": {
                "@name": "central",
                "book": [
                    {
                        "@id": "1",
                        "title": "First",
                        "tags": {"tag": ["old", "rare"]}
                    },
                    {
                        "@id": "2",
                        "title": "Second",
                        "tags": {"tag": "new"}
                    }
                ],
                "open": null
            }
        })
    );
}

#[test]
fn test_deeply_nested_document_within_limit() {
    let mut xml = String::new();
    for i in 0..50 {
        xml.push_str(&format!("<n{}>", i));
    }
    xml.push_str("leaf");
    for i in (0..50).rev() {
        xml.push_str(&format!("</n{}>", i));
    }
    assert!(convert_xml(&xml).is_ok());
}

#[test]
fn test_depth_limit_rejects_runaway_nesting() {
    let config = ConversionConfig::default().with_max_depth(10);
    let mut xml = String::new();
    for _ in 0..20 {
        xml.push_str("<n>");
    }
    for _ in 0..20 {
        xml.push_str("</n>");
    }
    assert!(convert_xml_with_config(&xml, &config).is_err());
}

#[test]
fn test_multiple_roots_rejected() {
    assert!(convert_xml("<a/><b/>").is_err());
}

#[test]
fn test_unicode_survives_conversion() {
    let value = convert_to_value("<msg>héllo wörld 你好</msg>");
    assert_eq!(value, json!({"msg": "héllo wörld 你好"}));
}
