use std::error::Error;

use serde::Serialize;

use super::SetupCmd;
use crate::commands::Execute;
use crate::db::schema::ALL_RELATIONS;
use crate::orm::SchoolContext;

/// Status of a database relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationState {
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "exists")]
    AlreadyExists,
    #[serde(rename = "would_create")]
    WouldCreate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetupRelation {
    pub name: &'static str,
    pub status: RelationState,
}

/// Result of the setup command execution
#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub backend: &'static str,
    pub relations: Vec<SetupRelation>,
    pub created_new: bool,
    pub dry_run: bool,
}

impl Execute for SetupCmd {
    type Output = SetupResult;

    fn execute(self, ctx: &SchoolContext) -> Result<Self::Output, Box<dyn Error>> {
        let backend = ctx.backend().backend_name();

        if self.dry_run {
            let relations = ALL_RELATIONS
                .iter()
                .map(|relation| -> Result<SetupRelation, Box<dyn Error>> {
                    let status = if ctx.backend().relation_exists(relation.name)? {
                        RelationState::AlreadyExists
                    } else {
                        RelationState::WouldCreate
                    };
                    Ok(SetupRelation {
                        name: relation.name,
                        status,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            return Ok(SetupResult {
                backend,
                relations,
                created_new: false,
                dry_run: true,
            });
        }

        let relations: Vec<_> = ctx
            .ensure_schema()?
            .into_iter()
            .map(|status| SetupRelation {
                name: status.name,
                status: if status.created {
                    RelationState::Created
                } else {
                    RelationState::AlreadyExists
                },
            })
            .collect();
        let created_new = relations.iter().any(|r| r.status == RelationState::Created);

        Ok(SetupResult {
            backend,
            relations,
            created_new,
            dry_run: false,
        })
    }
}
