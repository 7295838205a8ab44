// src/api/adapter.rs
//! Conversion from wire shapes to the domain model.
//!
//! Dispatch is on the API's `type` tags. Payloads that do not match the
//! expected shape degrade (unsupported block, unsupported property) and are
//! logged at debug level; they never fail the surrounding object.

use super::responses::*;
use crate::model::*;
use crate::types::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

// --- Objects ---

pub fn convert_page(wire: WirePage) -> Page {
    let id = PageId::new(&wire.id);
    let properties = wire
        .properties
        .into_iter()
        .map(|(name, value)| {
            let converted = convert_property_value(&name, &value);
            (PropertyName::new(name), converted)
        })
        .collect();

    Page {
        id,
        url: wire.url,
        properties,
        parent: wire.parent.as_ref().and_then(convert_parent),
        archived: wire.archived || wire.in_trash,
        cover: wire.cover.and_then(decode_optional),
        icon: wire.icon.and_then(decode_optional),
    }
}

pub fn convert_database(wire: WireDatabase) -> Database {
    let schema = wire
        .properties
        .into_iter()
        .map(|(key, prop)| {
            let name = if prop.name.is_empty() { key } else { prop.name };
            let column = DatabaseProperty {
                id: prop.id,
                name: PropertyName::new(name.clone()),
                kind: PropertyKind::from_type_name(&prop.kind),
            };
            (PropertyName::new(name), column)
        })
        .collect();

    Database {
        id: DatabaseId::new(&wire.id),
        title: convert_rich_text(&wire.title),
        description: convert_rich_text(&wire.description),
        url: wire.url,
        schema,
        parent: wire.parent.as_ref().and_then(convert_parent),
        is_inline: wire.is_inline,
        archived: wire.archived || wire.in_trash,
        cover: wire.cover.and_then(decode_optional),
        icon: wire.icon.and_then(decode_optional),
    }
}

pub fn convert_parent(value: &Value) -> Option<Parent> {
    let parent: WireParent = serde_json::from_value(value.clone()).ok()?;
    match parent {
        WireParent::PageId { page_id } => Some(Parent::Page(PageId::new(page_id))),
        WireParent::DatabaseId { database_id } => {
            Some(Parent::Database(DatabaseId::new(database_id)))
        }
        WireParent::BlockId { block_id } => Some(Parent::Block(BlockId::new(block_id))),
        WireParent::Workspace => Some(Parent::Workspace),
        WireParent::Unknown => {
            log::debug!("Unrecognized parent reference: {}", value);
            None
        }
    }
}

// --- Blocks ---

pub fn convert_block(mut wire: WireBlock) -> Block {
    let common = BlockCommon {
        id: BlockId::new(&wire.id),
        parent_id: wire
            .parent
            .as_ref()
            .and_then(convert_parent)
            .and_then(|p| p.id())
            .map(|id| BlockId::from(&id)),
        has_children: wire.has_children,
        archived: wire.archived || wire.in_trash,
    };

    let payload: WireBlockPayload = match wire.rest.remove(&wire.kind) {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            log::debug!("Unexpected {} payload on block {}: {}", wire.kind, wire.id, e);
            WireBlockPayload::default()
        }),
        None => WireBlockPayload::default(),
    };

    let text = |payload: &WireBlockPayload| TextBlockContent {
        rich_text: convert_rich_text(&payload.rich_text),
        color: payload.color.unwrap_or_default(),
    };

    match wire.kind.as_str() {
        "paragraph" => Block::Paragraph(TextBlock {
            content: text(&payload),
            common,
        }),
        "heading_1" | "heading_2" | "heading_3" => {
            let heading = HeadingBlock {
                content: text(&payload),
                is_toggleable: payload.is_toggleable,
                common,
            };
            match wire.kind.as_str() {
                "heading_1" => Block::Heading1(heading),
                "heading_2" => Block::Heading2(heading),
                _ => Block::Heading3(heading),
            }
        }
        "bulleted_list_item" => Block::BulletedListItem(TextBlock {
            content: text(&payload),
            common,
        }),
        "numbered_list_item" => Block::NumberedListItem(TextBlock {
            content: text(&payload),
            common,
        }),
        "quote" => Block::Quote(TextBlock {
            content: text(&payload),
            common,
        }),
        "to_do" => Block::ToDo(ToDoBlock {
            content: text(&payload),
            checked: payload.checked,
            common,
        }),
        "toggle" => Block::Toggle(ToggleBlock {
            content: text(&payload),
            common,
        }),
        "callout" => Block::Callout(CalloutBlock {
            content: text(&payload),
            icon: payload.icon.clone().and_then(decode_optional),
            common,
        }),
        "code" => Block::Code(CodeBlock {
            content: text(&payload),
            language: payload.language.clone().unwrap_or_default(),
            caption: convert_rich_text(&payload.caption),
            common,
        }),
        "equation" => Block::Equation(EquationBlock {
            expression: payload.expression.unwrap_or_default(),
            common,
        }),
        "divider" => Block::Divider(MarkerBlock { common }),
        "breadcrumb" => Block::Breadcrumb(MarkerBlock { common }),
        "table_of_contents" => Block::TableOfContents(MarkerBlock { common }),
        "column_list" => Block::ColumnList(MarkerBlock { common }),
        "column" => Block::Column(MarkerBlock { common }),
        "image" | "video" | "file" | "pdf" | "audio" => match media_source(&payload) {
            Some(source) => {
                let media = MediaBlock {
                    source,
                    caption: convert_rich_text(&payload.caption),
                    name: payload.name.clone(),
                    common,
                };
                match wire.kind.as_str() {
                    "image" => Block::Image(media),
                    "video" => Block::Video(media),
                    "pdf" => Block::Pdf(media),
                    _ => Block::File(media),
                }
            }
            None => unsupported(common, &wire.kind),
        },
        "bookmark" => Block::Bookmark(BookmarkBlock {
            url: payload.url.clone().unwrap_or_default(),
            caption: convert_rich_text(&payload.caption),
            common,
        }),
        "embed" => Block::Embed(EmbedBlock {
            url: payload.url.clone().unwrap_or_default(),
            caption: convert_rich_text(&payload.caption),
            common,
        }),
        "link_preview" => Block::LinkPreview(EmbedBlock {
            url: payload.url.clone().unwrap_or_default(),
            caption: Vec::new(),
            common,
        }),
        "child_page" => Block::ChildPage(ChildPageBlock {
            title: payload.title.unwrap_or_default(),
            common,
        }),
        "child_database" => Block::ChildDatabase(ChildDatabaseBlock {
            title: payload.title.unwrap_or_default(),
            common,
        }),
        "link_to_page" => {
            let target = match (payload.page_id.as_deref(), payload.database_id.as_deref()) {
                (Some(page_id), _) => NotionId::parse(page_id).ok().map(LinkTarget::Page),
                (None, Some(database_id)) => {
                    NotionId::parse(database_id).ok().map(LinkTarget::Database)
                }
                (None, None) => None,
            };
            match target {
                Some(target) => Block::LinkToPage(LinkToPageBlock { common, target }),
                None => unsupported(common, &wire.kind),
            }
        }
        "table" => Block::Table(TableBlock {
            table_width: payload.table_width,
            has_column_header: payload.has_column_header,
            has_row_header: payload.has_row_header,
            common,
        }),
        "table_row" => Block::TableRow(TableRowBlock {
            cells: payload.cells.iter().map(|c| convert_rich_text(c)).collect(),
            common,
        }),
        "synced_block" => Block::Synced(SyncedBlock {
            synced_from: payload.synced_from.map(|s| BlockId::new(s.block_id)),
            common,
        }),
        other => unsupported(common, other),
    }
}

fn unsupported(common: BlockCommon, block_type: &str) -> Block {
    Block::Unsupported(UnsupportedBlock {
        common,
        block_type: block_type.to_string(),
    })
}

fn media_source(payload: &WireBlockPayload) -> Option<FileObject> {
    match (payload.variant.as_deref(), &payload.external, &payload.file) {
        (Some("file"), _, Some(file)) => Some(FileObject::File { file: file.clone() }),
        (_, Some(external), _) => Some(FileObject::External {
            external: external.clone(),
        }),
        (_, None, Some(file)) => Some(FileObject::File { file: file.clone() }),
        _ => None,
    }
}

// --- Rich text ---

pub fn convert_rich_text(items: &[WireRichText]) -> Vec<RichTextItem> {
    items.iter().map(convert_rich_text_item).collect()
}

fn convert_rich_text_item(item: &WireRichText) -> RichTextItem {
    let text_type = match item.kind.as_str() {
        "mention" => RichTextType::Mention(
            item.mention
                .as_ref()
                .map(convert_mention)
                .unwrap_or(MentionType::Unknown),
        ),
        "equation" => RichTextType::Equation {
            expression: item
                .equation
                .as_ref()
                .map(|e| e.expression.clone())
                .unwrap_or_else(|| item.plain_text.clone()),
        },
        _ => {
            let (content, link) = match &item.text {
                Some(text) => (
                    text.content.clone(),
                    text.link.as_ref().map(|l| Link { url: l.url.clone() }),
                ),
                None => (item.plain_text.clone(), None),
            };
            RichTextType::Text { content, link }
        }
    };

    let a = &item.annotations;
    RichTextItem {
        text_type,
        annotations: Annotations {
            bold: a.bold,
            italic: a.italic,
            strikethrough: a.strikethrough,
            underline: a.underline,
            code: a.code,
            color: a.color,
        },
        plain_text: item.plain_text.clone(),
        href: item.href.clone(),
    }
}

fn convert_mention(value: &Value) -> MentionType {
    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
    let body = value.get(kind);
    let id_of = |body: Option<&Value>| {
        body.and_then(|b| b.get("id"))
            .and_then(Value::as_str)
            .and_then(|id| NotionId::parse(id).ok())
    };

    match kind {
        "page" => id_of(body).map_or(MentionType::Unknown, |id| MentionType::Page { id }),
        "database" => id_of(body).map_or(MentionType::Unknown, |id| MentionType::Database { id }),
        "user" => match body.cloned().map(serde_json::from_value::<WireUser>) {
            Some(Ok(user)) => MentionType::User {
                user: PartialUser {
                    id: user.id,
                    name: user.name,
                },
            },
            _ => MentionType::Unknown,
        },
        "date" => match body.cloned().map(serde_json::from_value::<WireDate>) {
            Some(Ok(date)) => MentionType::Date {
                date: convert_date(date),
            },
            _ => MentionType::Unknown,
        },
        "link_preview" => body
            .and_then(|b| b.get("url"))
            .and_then(Value::as_str)
            .map_or(MentionType::Unknown, |url| MentionType::LinkPreview {
                url: url.to_string(),
            }),
        "link_mention" => body
            .and_then(|b| b.get("href"))
            .and_then(Value::as_str)
            .map_or(MentionType::Unknown, |url| MentionType::LinkMention {
                url: url.to_string(),
            }),
        _ => MentionType::Unknown,
    }
}

// --- Properties ---

/// Converts one page property. The type tag is read from the value itself.
pub fn convert_property_value(name: &str, value: &Value) -> PropertyValue {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(name)
        .to_string();
    let type_name = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let body = value.get(&type_name).cloned().unwrap_or(Value::Null);

    let converted = convert_typed_value(&type_name, body).unwrap_or_else(|| {
        log::debug!("Property '{}' of type '{}' not understood", name, type_name);
        PropertyTypeValue::Unsupported {
            type_name: type_name.clone(),
        }
    });
    PropertyValue::new(id, converted)
}

fn convert_typed_value(type_name: &str, body: Value) -> Option<PropertyTypeValue> {
    use PropertyTypeValue as V;

    Some(match type_name {
        "title" => V::Title {
            title: convert_rich_text(&decode::<Vec<WireRichText>>(body)?),
        },
        "rich_text" => V::RichText {
            rich_text: convert_rich_text(&decode::<Vec<WireRichText>>(body)?),
        },
        "number" => V::Number {
            number: body.as_f64(),
        },
        "select" => V::Select {
            select: decode::<Option<WireSelect>>(body)?.map(convert_select),
        },
        "status" => V::Status {
            status: decode::<Option<WireSelect>>(body)?.map(convert_select),
        },
        "multi_select" => V::MultiSelect {
            multi_select: decode::<Vec<WireSelect>>(body)?
                .into_iter()
                .map(convert_select)
                .collect(),
        },
        "date" => V::Date {
            date: decode::<Option<WireDate>>(body)?.map(convert_date),
        },
        "formula" => V::Formula {
            formula: convert_formula(&body)?,
        },
        "relation" => V::Relation {
            relation: body
                .as_array()?
                .iter()
                .filter_map(|r| r.get("id").and_then(Value::as_str))
                .map(PageId::new)
                .collect(),
        },
        "rollup" => V::Rollup {
            rollup: convert_rollup(&body),
        },
        "people" => V::People {
            people: decode::<Vec<WireUser>>(body)?
                .into_iter()
                .map(convert_user)
                .collect(),
        },
        "files" => V::Files {
            files: body
                .as_array()?
                .iter()
                .filter_map(|f| {
                    let name = f.get("name").and_then(Value::as_str).unwrap_or_default();
                    let url = f
                        .get("external")
                        .or_else(|| f.get("file"))
                        .and_then(|h| h.get("url"))
                        .and_then(Value::as_str)?;
                    Some(File {
                        name: name.to_string(),
                        url: url.to_string(),
                    })
                })
                .collect(),
        },
        "checkbox" => V::Checkbox {
            checkbox: body.as_bool().unwrap_or(false),
        },
        "url" => V::Url {
            url: body.as_str().map(str::to_string),
        },
        "email" => V::Email {
            email: body.as_str().map(str::to_string),
        },
        "phone_number" => V::PhoneNumber {
            phone_number: body.as_str().map(str::to_string),
        },
        "created_time" => V::CreatedTime {
            created_time: body.as_str()?.to_string(),
        },
        "last_edited_time" => V::LastEditedTime {
            last_edited_time: body.as_str()?.to_string(),
        },
        "created_by" => V::CreatedBy {
            created_by: convert_user(decode::<WireUser>(body)?),
        },
        "last_edited_by" => V::LastEditedBy {
            last_edited_by: convert_user(decode::<WireUser>(body)?),
        },
        "unique_id" => V::UniqueId {
            prefix: body
                .get("prefix")
                .and_then(Value::as_str)
                .map(str::to_string),
            number: body.get("number").and_then(Value::as_i64),
        },
        _ => return None,
    })
}

fn convert_formula(body: &Value) -> Option<FormulaResult> {
    let kind = body.get("type").and_then(Value::as_str)?;
    let inner = body.get(kind).cloned().unwrap_or(Value::Null);
    Some(match kind {
        "string" => FormulaResult::String(inner.as_str().map(str::to_string)),
        "number" => FormulaResult::Number(inner.as_f64()),
        "boolean" => FormulaResult::Boolean(inner.as_bool()),
        "date" => FormulaResult::Date(decode::<Option<WireDate>>(inner)?.map(convert_date)),
        _ => return None,
    })
}

fn convert_rollup(body: &Value) -> RollupResult {
    let kind = body.get("type").and_then(Value::as_str).unwrap_or_default();
    let inner = body.get(kind).cloned().unwrap_or(Value::Null);
    match kind {
        "number" => RollupResult::Number(inner.as_f64()),
        "date" => RollupResult::Date(
            decode::<Option<WireDate>>(inner)
                .flatten()
                .map(convert_date),
        ),
        "array" => RollupResult::Array(
            inner
                .as_array()
                .map(|items| items.iter().filter_map(convert_rollup_item).collect())
                .unwrap_or_default(),
        ),
        _ => RollupResult::Unsupported,
    }
}

fn convert_rollup_item(item: &Value) -> Option<RollupArrayItem> {
    let kind = item.get("type").and_then(Value::as_str)?;
    let value = convert_typed_value(kind, item.get(kind).cloned().unwrap_or(Value::Null))?;
    Some(match value {
        PropertyTypeValue::Title { title } => RollupArrayItem::Title(title),
        PropertyTypeValue::RichText { rich_text } => RollupArrayItem::Title(rich_text),
        PropertyTypeValue::Number { number } => RollupArrayItem::Number(number?),
        PropertyTypeValue::Date { date } => RollupArrayItem::Date(date?),
        PropertyTypeValue::Select { select } | PropertyTypeValue::Status { status: select } => {
            RollupArrayItem::Text(select?.name)
        }
        PropertyTypeValue::Url { url } => RollupArrayItem::Text(url?),
        PropertyTypeValue::Checkbox { checkbox } => {
            RollupArrayItem::Text(if checkbox { "✓" } else { "" }.to_string())
        }
        _ => return None,
    })
}

fn convert_select(option: WireSelect) -> SelectOption {
    SelectOption {
        id: option.id.unwrap_or_default(),
        name: option.name,
        color: option.color,
    }
}

fn convert_date(date: WireDate) -> DateValue {
    DateValue {
        start: date.start,
        end: date.end,
        time_zone: date.time_zone,
    }
}

fn convert_user(user: WireUser) -> User {
    User {
        id: user.id,
        name: user.name,
        email: user.person.and_then(|p| p.email),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

fn decode_optional<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    decode(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(value: Value) -> Block {
        convert_block(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_toggleable_heading() {
        let b = block(json!({
            "object": "block",
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "parent": {"type": "page_id", "page_id": "660e8400-e29b-41d4-a716-446655440000"},
            "type": "heading_1",
            "has_children": true,
            "heading_1": {
                "rich_text": [{"type": "text", "plain_text": "FAQ", "text": {"content": "FAQ"}}],
                "is_toggleable": true,
                "color": "default"
            }
        }));

        match &b {
            Block::Heading1(h) => {
                assert!(h.is_toggleable);
                assert_eq!(h.content.rich_text[0].plain_text, "FAQ");
            }
            other => panic!("expected heading_1, got {:?}", other),
        }
        assert!(b.has_children());
        assert_eq!(
            b.parent_id().map(|p| p.as_str()),
            Some("660e8400e29b41d4a716446655440000")
        );
    }

    #[test]
    fn test_table_row_parent_is_table_block() {
        let b = block(json!({
            "id": "a1",
            "parent": {"type": "block_id", "block_id": "T1"},
            "type": "table_row",
            "table_row": {"cells": [[{"type": "text", "plain_text": "x"}], []]}
        }));
        match &b {
            Block::TableRow(row) => assert_eq!(row.cells.len(), 2),
            other => panic!("expected table_row, got {:?}", other),
        }
        assert_eq!(b.parent_id(), Some(&BlockId::new("T1")));
    }

    #[test]
    fn test_unknown_block_type_is_unsupported() {
        let b = block(json!({"id": "a1", "type": "meeting_notes", "meeting_notes": {}}));
        assert_eq!(b.block_type(), "meeting_notes");
        assert!(matches!(b, Block::Unsupported(_)));
    }

    #[test]
    fn test_media_block_with_uploaded_file() {
        let b = block(json!({
            "id": "a1",
            "type": "image",
            "image": {"type": "file", "file": {"url": "https://s3/x.png", "expiry_time": null}, "caption": []}
        }));
        match b {
            Block::Image(media) => assert_eq!(media.source.url(), "https://s3/x.png"),
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_page_mention_and_date_mention() {
        let items: Vec<WireRichText> = serde_json::from_value(json!([
            {"type": "mention", "plain_text": "Roadmap",
             "mention": {"type": "page", "page": {"id": "550e8400-e29b-41d4-a716-446655440000"}}},
            {"type": "mention", "plain_text": "Jan 1",
             "mention": {"type": "date", "date": {"start": "2024-01-01", "end": null}}}
        ]))
        .unwrap();
        let converted = convert_rich_text(&items);
        assert!(matches!(
            &converted[0].text_type,
            RichTextType::Mention(MentionType::Page { id }) if id.as_str() == "550e8400e29b41d4a716446655440000"
        ));
        assert!(matches!(
            &converted[1].text_type,
            RichTextType::Mention(MentionType::Date { date }) if date.start == "2024-01-01"
        ));
    }

    #[test]
    fn test_page_properties_keep_api_order() {
        let wire: WirePage = serde_json::from_str(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "url": "https://www.notion.so/x",
                "properties": {
                    "Status": {"id": "s1", "type": "status", "status": {"id": "o1", "name": "Done", "color": "green"}},
                    "Name": {"id": "title", "type": "title", "title": [{"type": "text", "plain_text": "Ship it"}]},
                    "Due": {"id": "d1", "type": "date", "date": {"start": "2024-01-01", "end": "2024-01-05"}},
                    "Votes": {"id": "v1", "type": "button", "button": {}}
                }
            }"#,
        )
        .unwrap();
        let page = convert_page(wire);

        let names: Vec<&str> = page.properties.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["Status", "Name", "Due", "Votes"]);
        assert_eq!(page.properties["Name"].id, "title");
        assert_eq!(page.properties["Votes"].kind(), PropertyKind::Unsupported);
        match &page.properties["Status"].type_specific_value {
            PropertyTypeValue::Status { status: Some(s) } => assert_eq!(s.color, Color::Green),
            other => panic!("expected status, got {:?}", other),
        }
    }

    #[test]
    fn test_database_inline_flag_and_schema_order() {
        let wire: WireDatabase = serde_json::from_str(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "title": [{"type": "text", "plain_text": "Tasks"}],
                "description": [{"type": "text", "plain_text": "Team tasks"}],
                "is_inline": true,
                "parent": {"type": "page_id", "page_id": "660e8400e29b41d4a716446655440000"},
                "properties": {
                    "Due": {"id": "d1", "name": "Due", "type": "date"},
                    "Name": {"id": "title", "name": "Name", "type": "title"}
                }
            }"#,
        )
        .unwrap();
        let db = convert_database(wire);
        assert!(db.is_inline);
        assert_eq!(db.description[0].plain_text, "Team tasks");
        let kinds: Vec<PropertyKind> = db.schema.values().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![PropertyKind::Date, PropertyKind::Title]);
        assert!(matches!(db.parent, Some(Parent::Page(_))));
    }
}
