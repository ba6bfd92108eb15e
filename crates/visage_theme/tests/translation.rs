use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use visage_paint::{Color, Gradient};
use visage_theme::schema::{Slot, FRAME, GUIDANCE};
use visage_theme::{
    translate, CancelButtonLocation, ConfigurationDocument, CustomizationSchema, ExitAnimation,
    FieldSpec, NativeTheme, SemanticType, Translator,
};

fn doc(value: Value) -> ConfigurationDocument {
    ConfigurationDocument::from_value(value).unwrap()
}

fn single_field(spec: &FieldSpec, raw: Value) -> ConfigurationDocument {
    let mut fields = Map::new();
    fields.insert(spec.field.to_string(), raw);
    let mut groups = Map::new();
    groups.insert(spec.group.to_string(), Value::Object(fields));
    ConfigurationDocument::from_map(groups)
}

fn fields_of(kind: SemanticType) -> impl Iterator<Item = &'static FieldSpec> {
    CustomizationSchema::standard()
        .fields()
        .filter(move |spec| spec.kind == kind)
}

fn read_color(theme: &mut NativeTheme, spec: &FieldSpec) -> Color {
    match (spec.write.unwrap())(theme) {
        Slot::Color(color) => *color,
        _ => panic!("{spec:?} is not a color slot"),
    }
}

#[test]
fn frame_border_overrides_only_its_fields() {
    let theme = translate(
        &doc(json!({
            "faceTecFrameCustomization": { "borderWidth": 4, "borderColor": "#FF0000" }
        })),
        CustomizationSchema::standard(),
    );

    let defaults = NativeTheme::default();
    assert_eq!(theme.frame.border_width, 4);
    assert_eq!(theme.frame.border_color, Color::new(255, 0, 0, 255));
    assert_eq!(theme.frame.corner_radius, defaults.frame.corner_radius);
    assert_eq!(theme.frame.elevation, defaults.frame.elevation);
    assert_eq!(theme.frame.background_color, defaults.frame.background_color);

    let mut expected = defaults;
    expected.frame.border_width = 4;
    expected.frame.border_color = Color::RED;
    assert_eq!(theme, expected);
}

#[test]
fn empty_document_is_default_theme() {
    let translator = Translator::standard();
    assert_eq!(translator.translate(&ConfigurationDocument::new()), NativeTheme::default());
    assert_eq!(translator.translate(&doc(json!({}))), NativeTheme::default());
    assert_eq!(
        translator.translate(&doc(json!({ FRAME: {} }))),
        NativeTheme::default()
    );
}

#[test]
fn valid_hex_lands_exactly_in_every_color_field() {
    for spec in fields_of(SemanticType::Color) {
        let mut theme = Translator::standard().translate(&single_field(spec, json!("#0A1B2C3D")));
        assert_eq!(read_color(&mut theme, spec), Color::new(0x0A, 0x1B, 0x2C, 0x3D), "{spec:?}");

        let mut theme = Translator::standard().translate(&single_field(spec, json!("#FEDCBA")));
        assert_eq!(read_color(&mut theme, spec), Color::new(0xFE, 0xDC, 0xBA, 0xFF), "{spec:?}");
    }
}

#[test]
fn invalid_colors_are_always_skipped() {
    let invalid = [
        json!("red"),
        json!("FF0000"),
        json!("#F00"),
        json!("#FF00000"),
        json!("#GG0000"),
        json!(""),
        json!(0xFF0000),
        json!(null),
        json!(["#FF0000"]),
        json!({ "hex": "#FF0000" }),
    ];

    for spec in fields_of(SemanticType::Color) {
        for raw in &invalid {
            let theme = Translator::standard().translate(&single_field(spec, raw.clone()));
            assert_eq!(theme, NativeTheme::default(), "{spec:?} accepted {raw}");
        }
    }
}

#[test]
fn color_lists_become_horizontal_gradients() {
    let list = json!(["#FF0000", "bogus", "#00FF00", "#0000FF"]);
    for spec in fields_of(SemanticType::ColorList) {
        let mut theme = Translator::standard().translate(&single_field(spec, list.clone()));
        match (spec.write.unwrap())(&mut theme) {
            Slot::Gradient(gradient) => {
                assert_eq!(*gradient, Gradient::horizontal(Color::RED, Color::BLUE), "{spec:?}")
            }
            _ => panic!("{spec:?} is not a gradient slot"),
        }
    }
}

#[test]
fn junk_never_panics_and_only_touches_its_field() {
    let junk = [
        json!(null),
        json!(true),
        json!(-1),
        json!(2.75),
        json!(1e40),
        json!("#FFFFFF"),
        json!("topRight"),
        json!(["#FFFFFF", 3]),
        json!({ "nested": { "deeper": [] } }),
    ];

    let schema = CustomizationSchema::standard();
    for spec in schema.fields() {
        for raw in &junk {
            let mut theme = Translator::standard().translate(&single_field(spec, raw.clone()));

            // Reset the field under test; everything else must still be default
            if let Some(write) = spec.write {
                let mut defaults = NativeTheme::default();
                reset(write(&mut theme), write(&mut defaults));
            }
            assert_eq!(theme, NativeTheme::default(), "{spec:?} leaked {raw}");
        }
    }
}

fn reset(target: Slot<'_>, source: Slot<'_>) {
    match (target, source) {
        (Slot::Color(t), Slot::Color(s)) => *t = *s,
        (Slot::Gradient(t), Slot::Gradient(s)) => *t = s.clone(),
        (Slot::Int(t), Slot::Int(s)) => *t = *s,
        (Slot::Scale(t), Slot::Scale(s)) => *t = *s,
        (Slot::Bool(t), Slot::Bool(s)) => *t = *s,
        (Slot::Text(t), Slot::Text(s)) => *t = s.clone(),
        (Slot::Enum(t), Slot::Enum(_)) => {
            // Enum slots in the default theme all hold their first variant
            let first = t.variants()[0];
            assert!(t.set_variant(first));
        }
        _ => panic!("mismatched slots"),
    }
}

#[test]
fn enums_require_exact_variants() {
    let translator = Translator::standard();
    let theme = translator.translate(&doc(json!({
        "faceTecCancelButtonCustomization": { "location": "topRight" },
        "faceTecExitAnimationStyle": { "animation": "rippleIn" },
    })));
    assert_eq!(theme.cancel_button.location, CancelButtonLocation::TopRight);
    assert_eq!(theme.exit_animation.animation, ExitAnimation::RippleIn);

    let theme = translator.translate(&doc(json!({
        "faceTecCancelButtonCustomization": { "location": "TopRight" },
        "faceTecExitAnimationStyle": { "animation": "ripple_in" },
    })));
    assert_eq!(theme, NativeTheme::default());
}

#[test]
fn button_fields_are_shared_but_independent() {
    let theme = Translator::standard().translate(&doc(json!({
        GUIDANCE: { "buttonCornerRadius": 24, "buttonTextNormalColor": "#000000" },
    })));
    assert_eq!(theme.guidance.button.corner_radius, 24);
    assert_eq!(theme.guidance.button.text_normal_color, Color::BLACK);
    assert_eq!(theme.id_scan.button, NativeTheme::default().id_scan.button);
    assert_eq!(
        theme.ocr_confirmation.button,
        NativeTheme::default().ocr_confirmation.button
    );
}

#[test]
fn attributed_strings_and_unsupported_assets() {
    let theme = Translator::standard().translate(&doc(json!({
        GUIDANCE: {
            "readyScreenHeaderAttributedString": "Get ready",
            "retryScreenSlideshowImages": ["a.png", "b.png"],
            "headerFont": { "family": "Inter", "size": 18 },
        },
    })));
    assert_eq!(
        theme.guidance.ready_screen_header_attributed_string.as_deref(),
        Some("Get ready")
    );

    let mut expected = NativeTheme::default();
    expected.guidance.ready_screen_header_attributed_string = Some("Get ready".into());
    assert_eq!(theme, expected);
}
