//! Snapshot ingestion: normalizes card documents into the relational graph.
//!
//! Resolution order matters: leaf reference entities first, then composites
//! that hold foreign keys to them, and the card row last. The whole batch
//! runs inside one transaction and commits together at the end.

use crate::config::{self, ResourceKind};
use crate::db::Database;
use crate::error::Result;
use crate::models::{Attack, CardDocument, Checkpoint};
use crate::resolver::{int, opt_int, opt_text, text, EntityId, EntityKind, EntityResolver};
use crate::store::ResourceStore;
use duckdb::params;

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestSummary {
    /// Reference entities newly created from the four reference files.
    pub reference_entities: usize,
    /// Card rows inserted this run.
    pub cards: usize,
}

/// Builds the relational graph for every card in a snapshot.
pub struct Ingestor<'a> {
    db: &'a Database,
    resolver: EntityResolver<'a>,
}

impl<'a> Ingestor<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            resolver: EntityResolver::new(db),
        }
    }

    /// Ingest the whole snapshot held by `store`.
    ///
    /// Cards are append-only: running this twice against the same database
    /// inserts every card row a second time. Use a fresh database (or clear
    /// it) before re-ingesting.
    pub fn run(&self, store: &ResourceStore) -> Result<IngestSummary> {
        self.run_limit(store, None)
    }

    /// Ingest at most `limit` cards from the snapshot prefix.
    pub fn run_limit(&self, store: &ResourceStore, limit: Option<usize>) -> Result<IngestSummary> {
        self.db.begin()?;
        match self.run_in_transaction(store, limit) {
            Ok(summary) => {
                self.db.commit()?;
                eprintln!("Ingested {} cards", summary.cards);
                Ok(summary)
            }
            Err(e) => {
                let _ = self.db.rollback();
                Err(e)
            }
        }
    }

    fn run_in_transaction(
        &self,
        store: &ResourceStore,
        limit: Option<usize>,
    ) -> Result<IngestSummary> {
        let reference_entities = self.load_reference(store)?;

        let checkpoint: Checkpoint = store.read_as(config::CARDS_FILE)?;
        let take = limit.unwrap_or(checkpoint.data.len());
        let mut cards = 0;
        for card in checkpoint.data.iter().take(take) {
            self.ingest(card)?;
            cards += 1;
        }

        Ok(IngestSummary {
            reference_entities,
            cards,
        })
    }

    /// Load the four reference files, creating one entity per listed name.
    fn load_reference(&self, store: &ResourceStore) -> Result<usize> {
        let mut created = 0;
        for kind in ResourceKind::ALL {
            let names: Vec<String> = store.read_as(kind.file_name())?;
            let entity = match kind {
                ResourceKind::Type => EntityKind::Type,
                ResourceKind::Supertype => EntityKind::SuperType,
                ResourceKind::Subtype => EntityKind::SubType,
                ResourceKind::Rarity => EntityKind::Rarity,
            };
            for name in &names {
                let resolved = self
                    .resolver
                    .find_or_create(entity, &[("name", text(name))])?;
                if resolved.created {
                    created += 1;
                }
            }
        }
        Ok(created)
    }

    /// Materialize every entity one card references, dependencies first,
    /// then insert the card row and its relations. Returns the card row id.
    pub fn ingest(&self, card: &CardDocument) -> Result<EntityId> {
        let r = &self.resolver;

        let supertype = r.find_or_create(EntityKind::SuperType, &[("name", text(&card.supertype))])?;
        let image = r.find_or_create(
            EntityKind::Image,
            &[
                ("primary_url", text(&card.images.small)),
                ("secondary_url", text(&card.images.large)),
            ],
        )?;
        let set_image = r.find_or_create(
            EntityKind::Image,
            &[
                ("primary_url", text(&card.set.images.symbol)),
                ("secondary_url", text(&card.set.images.logo)),
            ],
        )?;
        let card_set = r.find_or_create(
            EntityKind::CardSet,
            &[
                ("set_id", text(&card.set.id)),
                ("image_id", int(set_image.id)),
                ("name", text(&card.set.name)),
                ("printed_total", int(card.set.printed_total)),
                ("ptcgo_code", opt_text(card.set.ptcgo_code.as_deref())),
                ("release_date", text(&card.set.release_date)),
                ("series", text(&card.set.series)),
                ("total", int(card.set.total)),
                ("updated_at", text(&card.set.updated_at)),
            ],
        )?;
        let rarity = match &card.rarity {
            Some(name) => Some(r.find_or_create(EntityKind::Rarity, &[("name", text(name))])?),
            None => None,
        };

        let mut type_ids = Vec::new();
        for name in card.types.iter().flatten() {
            type_ids.push(r.find_or_create(EntityKind::Type, &[("name", text(name))])?.id);
        }

        let mut subtype_ids = Vec::new();
        for name in card.subtypes.iter().flatten() {
            subtype_ids.push(r.find_or_create(EntityKind::SubType, &[("name", text(name))])?.id);
        }

        let mut weakness_ids = Vec::new();
        for weakness in card.weaknesses.iter().flatten() {
            let type_ = r.find_or_create(EntityKind::Type, &[("name", text(&weakness.type_field))])?;
            let entry = r.find_or_create(
                EntityKind::Weakness,
                &[("type_id", int(type_.id)), ("value", text(&weakness.value))],
            )?;
            weakness_ids.push(entry.id);
        }

        let mut resistance_ids = Vec::new();
        for resistance in card.resistances.iter().flatten() {
            let type_ =
                r.find_or_create(EntityKind::Type, &[("name", text(&resistance.type_field))])?;
            let entry = r.find_or_create(
                EntityKind::Resistance,
                &[("type_id", int(type_.id)), ("value", text(&resistance.value))],
            )?;
            resistance_ids.push(entry.id);
        }

        let mut ability_ids = Vec::new();
        for ability in card.abilities.iter().flatten() {
            let ability_type =
                r.find_or_create(EntityKind::AbilityType, &[("name", text(&ability.type_field))])?;
            let entry = r.find_or_create(
                EntityKind::Ability,
                &[
                    ("name", text(&ability.name)),
                    ("text", text(&ability.text)),
                    ("type_id", int(ability_type.id)),
                ],
            )?;
            ability_ids.push(entry.id);
        }

        let mut attack_ids = Vec::new();
        for attack in card.attacks.iter().flatten() {
            attack_ids.push(self.ingest_attack(attack)?);
        }

        let card_row = self.insert_card(
            card,
            supertype.id,
            card_set.id,
            image.id,
            rarity.map(|res| res.id),
        )?;
        self.link(card_row, "card_types", "type_id", &type_ids)?;
        self.link(card_row, "card_subtypes", "subtype_id", &subtype_ids)?;
        self.link(card_row, "card_weaknesses", "weakness_id", &weakness_ids)?;
        self.link(card_row, "card_resistances", "resistance_id", &resistance_ids)?;
        self.link(card_row, "card_abilities", "ability_id", &ability_ids)?;
        self.link(card_row, "card_attacks", "attack_id", &attack_ids)?;

        Ok(card_row)
    }

    /// Attacks dedup on everything but cost, and the cost join rows are
    /// written once, when the attack itself is first created. Cost entries
    /// may repeat ("Fire", "Fire"), so each is a plain insert.
    fn ingest_attack(&self, attack: &Attack) -> Result<EntityId> {
        let resolved = self.resolver.find_or_create(
            EntityKind::Attack,
            &[
                ("name", text(&attack.name)),
                ("converted_energy_cost", int(attack.converted_energy_cost)),
                ("damage", opt_text(attack.damage.as_deref())),
                ("text", opt_text(attack.text.as_deref())),
            ],
        )?;
        if resolved.created {
            for cost in attack.cost.iter().flatten() {
                let type_ = self
                    .resolver
                    .find_or_create(EntityKind::Type, &[("name", text(cost))])?;
                self.db.raw().execute(
                    "INSERT INTO attack_types (attack_id, type_id) VALUES (?, ?)",
                    params![resolved.id, type_.id],
                )?;
            }
        }
        Ok(resolved.id)
    }

    fn insert_card(
        &self,
        card: &CardDocument,
        supertype_id: EntityId,
        card_set_id: EntityId,
        image_id: EntityId,
        rarity_id: Option<EntityId>,
    ) -> Result<EntityId> {
        let mut stmt = self.db.raw().prepare(
            "INSERT INTO cards (card_id, name, number, supertype_id, card_set_id, image_id, \
             rarity_id, artist, converted_retreat_cost, evolves_from, flavor_text, hp, \
             regulation_mark) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )?;
        let values = [
            text(&card.id),
            text(&card.name),
            text(&card.number),
            int(supertype_id),
            int(card_set_id),
            int(image_id),
            opt_int(rarity_id),
            opt_text(card.artist.as_deref()),
            opt_int(card.converted_retreat_cost),
            opt_text(card.evolves_from.as_deref()),
            opt_text(card.flavor_text.as_deref()),
            opt_text(card.hp.as_deref()),
            opt_text(card.regulation_mark.as_deref()),
        ];
        let id = stmt.query_row(duckdb::params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(id)
    }

    fn link(
        &self,
        card_row: EntityId,
        table: &str,
        column: &str,
        ids: &[EntityId],
    ) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let sql = format!("INSERT INTO {} (card_id, {}) VALUES (?, ?)", table, column);
        let mut stmt = self.db.raw().prepare(&sql)?;
        for id in ids {
            stmt.execute(params![card_row, id])?;
        }
        Ok(())
    }
}
