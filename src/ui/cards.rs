use serde::Deserialize;

use crate::models::ActivityCollection;

/// Payload bound to one unregister control when the list is drawn.
/// The click handler reads it back verbatim instead of looking anything up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnregisterBinding {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub email: String,
    pub unregister: UnregisterBinding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantRow>,
}

impl ActivityCard {
    pub fn availability_label(&self) -> String {
        format!("{} spots left", self.spots_left)
    }

    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }

    pub fn unregister_controls(&self) -> impl Iterator<Item = &UnregisterBinding> {
        self.participants.iter().map(|p| &p.unregister)
    }
}

pub fn build_activity_cards(activities: &ActivityCollection) -> Vec<ActivityCard> {
    activities
        .iter()
        .map(|(name, details)| ActivityCard {
            name: name.to_string(),
            description: details.description.clone(),
            schedule: details.schedule.clone(),
            spots_left: details.spots_left(),
            participants: details
                .participants
                .iter()
                .map(|email| ParticipantRow {
                    email: email.clone(),
                    unregister: UnregisterBinding {
                        activity: name.to_string(),
                        email: email.clone(),
                    },
                })
                .collect(),
        })
        .collect()
}
