use serde::{Deserialize, Serialize};

use super::favorites::PetId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetStatus {
    Available,
    #[serde(rename = "In Trial")]
    InTrial,
    Adopted,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
}

/// A pet record as served by the external listing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub breed: String,
    pub age: String,
    pub gender: String,
    pub size: String,
    pub color: String,
    #[serde(rename = "healthCondition")]
    pub health_condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub image: String,
    pub status: PetStatus,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub story: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_listing_record() {
        let pet: Pet = serde_json::from_str(
            r#"{
                "id": 3, "name": "Biscuit", "breed": "Aspin", "age": "2 years",
                "gender": "Male", "size": "Medium", "color": "Brown",
                "healthCondition": "Vaccinated", "image": "/images/biscuit.jpg",
                "status": "In Trial", "type": "dog", "story": "Found near the market."
            }"#,
        )
        .unwrap();
        assert_eq!(pet.status, PetStatus::InTrial);
        assert_eq!(pet.pet_type, PetType::Dog);
        assert_eq!(pet.health_condition, "Vaccinated");
        assert_eq!(pet.details, None);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let res = serde_json::from_str::<PetStatus>(r#""Missing""#);
        assert!(res.is_err());
    }
}
