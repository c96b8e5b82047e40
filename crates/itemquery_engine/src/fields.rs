//! Spawn fields: a query plus how to shape the items it produces.
//!
//! Content data describes most spawned items with a [`SpawnItemFields`]
//! block. [`QueryEngine::resolve_spawn`] resolves the block's query and
//! then applies stack, quality, name, and recipe settings to each result.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use itemquery_foundation::item::normalize_quality;
use itemquery_foundation::{
    ItemClass, ModifierMode, QuantityModifier, Salable, apply_modifiers_int, id,
};

use crate::context::QueryContext;
use crate::resolve::{QueryEngine, ResolveOptions, ResolvedItem};
use crate::sink::ErrorSink;

/// Placeholder in a display name override for the item's own display name.
pub const DISPLAY_NAME_TOKEN: &str = "%DISPLAY_NAME";

/// A query and the item settings to apply to what it produces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnItemFields {
    /// Identifier for this entry, unique within its list.
    pub id: String,
    /// The item ID or query to resolve.
    pub item_id: Option<String>,
    /// Queries to choose from at random; takes precedence over `item_id`.
    pub random_item_id: Vec<String>,
    /// Condition each produced item must pass.
    pub per_item_condition: Option<String>,
    /// Maximum number of items to produce.
    pub max_items: Option<usize>,
    /// Produce the recipe instead of the item.
    pub is_recipe: bool,
    /// Quality to set, or `-1` to keep the item's.
    pub quality: i32,
    /// Minimum stack size, or `-1` for no minimum.
    pub min_stack: i32,
    /// Maximum stack size; with `min_stack`, picks a random stack.
    pub max_stack: i32,
    /// Internal name override.
    pub object_internal_name: Option<String>,
    /// Display name override; may contain [`DISPLAY_NAME_TOKEN`].
    pub object_display_name: Option<String>,
    /// Tool upgrade level, or `-1` to keep the tool's.
    pub tool_upgrade_level: i32,
    /// Modifiers applied to the stack size.
    pub stack_modifiers: Vec<QuantityModifier>,
    /// How stack modifiers combine.
    pub stack_modifier_mode: ModifierMode,
    /// Modifiers applied to the quality.
    pub quality_modifiers: Vec<QuantityModifier>,
    /// How quality modifiers combine.
    pub quality_modifier_mode: ModifierMode,
    /// Metadata merged into each item.
    pub mod_data: BTreeMap<String, String>,
}

impl Default for SpawnItemFields {
    fn default() -> Self {
        Self {
            id: String::new(),
            item_id: None,
            random_item_id: Vec::new(),
            per_item_condition: None,
            max_items: None,
            is_recipe: false,
            quality: -1,
            min_stack: -1,
            max_stack: -1,
            object_internal_name: None,
            object_display_name: None,
            tool_upgrade_level: -1,
            stack_modifiers: Vec::new(),
            stack_modifier_mode: ModifierMode::Stack,
            quality_modifiers: Vec::new(),
            quality_modifier_mode: ModifierMode::Stack,
            mod_data: BTreeMap::new(),
        }
    }
}

impl SpawnItemFields {
    /// Creates fields for a single query.
    #[must_use]
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: Some(item_id.into()),
            ..Self::default()
        }
    }

    /// Creates fields choosing between queries at random.
    #[must_use]
    pub fn random(item_ids: Vec<String>) -> Self {
        Self {
            random_item_id: item_ids,
            ..Self::default()
        }
    }

    /// Builder method to set the entry ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method to set the stack range.
    #[must_use]
    pub fn with_stack(mut self, min: i32, max: i32) -> Self {
        self.min_stack = min;
        self.max_stack = max;
        self
    }

    /// Builder method to set the quality.
    #[must_use]
    pub fn with_quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    /// Builder method to produce recipes.
    #[must_use]
    pub fn as_recipe(mut self) -> Self {
        self.is_recipe = true;
        self
    }

    /// Builder method to limit how many items are produced.
    #[must_use]
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Builder method to filter produced items.
    #[must_use]
    pub fn with_per_item_condition(mut self, condition: impl Into<String>) -> Self {
        self.per_item_condition = Some(condition.into());
        self
    }

    /// Builder method to override the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.object_display_name = Some(name.into());
        self
    }

    /// Builder method to set the tool upgrade level.
    #[must_use]
    pub fn with_tool_upgrade_level(mut self, level: i32) -> Self {
        self.tool_upgrade_level = level;
        self
    }

    /// Builder method to add a stack modifier.
    #[must_use]
    pub fn with_stack_modifier(mut self, modifier: QuantityModifier) -> Self {
        self.stack_modifiers.push(modifier);
        self
    }

    /// Builder method to add a quality modifier.
    #[must_use]
    pub fn with_quality_modifier(mut self, modifier: QuantityModifier) -> Self {
        self.quality_modifiers.push(modifier);
        self
    }

    /// Builder method to add metadata.
    #[must_use]
    pub fn with_mod_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.mod_data.insert(key.into(), value.into());
        self
    }

    /// A name for this entry in logs: its ID, or else its query.
    #[must_use]
    pub fn entry_id(&self) -> &str {
        if !self.id.is_empty() {
            return &self.id;
        }
        self.item_id
            .as_deref()
            .or_else(|| self.random_item_id.first().map(String::as_str))
            .unwrap_or_default()
    }
}

/// Applies spawn fields to a produced salable.
///
/// Salables which aren't items only take the stack size. A recipe always
/// has a stack of one; equip-only items become plain objects when sold as
/// recipes.
#[must_use]
pub fn apply_item_fields(
    salable: Salable,
    fields: &SpawnItemFields,
    context: &QueryContext,
) -> Salable {
    let random = context.random();

    if fields.is_recipe {
        if let Salable::Item(mut item) = salable {
            if item.class.is_equip_only() {
                item.qualified_id = id::qualify(id::OBJECT, item.local_id());
                item.class = ItemClass::Object;
            }
            item.is_recipe = true;
            item.stack = 1;
            return Salable::Item(finish_item(item, fields, context));
        }
    }

    let mut stack = salable.stack();
    if fields.max_stack > 1 {
        let min = fields.min_stack.max(1);
        stack = random.borrow_mut().range_inclusive(min, fields.max_stack.max(min));
    } else if fields.min_stack > 0 {
        stack = fields.min_stack;
    }
    let target = salable.as_item();
    stack = apply_modifiers_int(
        stack,
        &fields.stack_modifiers,
        fields.stack_modifier_mode,
        &mut |condition| context.check_conditions(Some(condition), target),
        random,
    );

    match salable {
        Salable::Item(mut item) => {
            item.set_stack(stack);
            Salable::Item(finish_item(item, fields, context))
        }
        Salable::Other(mut other) => {
            other.stack = stack.max(1);
            Salable::Other(other)
        }
    }
}

fn finish_item(
    mut item: itemquery_foundation::Item,
    fields: &SpawnItemFields,
    context: &QueryContext,
) -> itemquery_foundation::Item {
    let quality = if fields.quality >= 0 {
        fields.quality
    } else {
        item.quality
    };
    let quality = apply_modifiers_int(
        quality,
        &fields.quality_modifiers,
        fields.quality_modifier_mode,
        &mut |condition| context.check_conditions(Some(condition), Some(&item)),
        context.random(),
    );
    item.quality = normalize_quality(quality);

    if let Some(name) = &fields.object_internal_name {
        item.name.clone_from(name);
    }
    if let Some(display) = &fields.object_display_name {
        item.display_name = display.replace(DISPLAY_NAME_TOKEN, &item.display_name);
    }
    if fields.tool_upgrade_level >= 0 && item.class == ItemClass::Tool {
        item.upgrade_level = fields.tool_upgrade_level;
    }
    for (key, value) in &fields.mod_data {
        item.mod_data.insert(key.clone(), value.clone());
    }
    item
}

impl QueryEngine {
    /// Resolves spawn fields and applies them to every produced item.
    ///
    /// The fields' item limit and per-item condition replace those in
    /// `options` when set. A result's `override_stack_size` replaces the
    /// fields' stack settings for that item.
    pub fn resolve_spawn(
        &self,
        fields: &SpawnItemFields,
        context: QueryContext,
        options: &ResolveOptions<'_>,
        errors: &mut dyn ErrorSink,
    ) -> Vec<ResolvedItem> {
        let query = if fields.random_item_id.is_empty() {
            fields.item_id.clone()
        } else {
            context
                .random()
                .borrow_mut()
                .choose(&fields.random_item_id)
                .cloned()
        };
        let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
            errors.report(fields.entry_id(), "must set item_id or random_item_id");
            return Vec::new();
        };

        let options = ResolveOptions {
            max_items: fields.max_items.or(options.max_items),
            per_item_condition: fields
                .per_item_condition
                .as_deref()
                .or(options.per_item_condition),
            ..*options
        };

        let (results, context) = self.resolve_sealed(&query, context, &options, errors);
        results
            .into_iter()
            .map(|mut result| {
                result.item = apply_item_fields(result.item, fields, &context);
                if let Some(stack) = result.override_stack_size.filter(|_| !result.item.is_recipe()) {
                    result.item.set_stack(stack);
                }
                result
            })
            .collect()
    }
}
