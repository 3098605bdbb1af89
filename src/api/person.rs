//! Person, face-set, and group management shapes.

// self
use crate::{
	_prelude::*,
	api::Endpoint,
	dispatch::{Dispatcher, Envelope},
	http::{ApiHttpClient, TransportErrorMapper},
};

/// Request body for [`Endpoint::NewPerson`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPersonRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Base64-encoded image holding the person's first face.
	pub image: String,
	/// Caller-chosen person identifier.
	pub person_id: String,
	/// Groups the person joins.
	pub group_ids: Vec<String>,
	/// Display name.
	pub person_name: String,
	/// Free-form tag.
	pub tag: String,
}

/// Body of a [`Endpoint::NewPerson`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPersonBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Number of groups joined.
	pub suc_group: i32,
	/// Number of faces stored.
	pub suc_face: i32,
	/// Person identifier.
	pub person_id: String,
	/// Identifier of the stored face.
	pub face_id: String,
	/// Groups the person joined.
	pub group_ids: Vec<String>,
}
/// Response of [`Endpoint::NewPerson`].
pub type NewPersonResponse = Envelope<NewPersonBody>;

/// Request body for [`Endpoint::DelPerson`] and [`Endpoint::GetInfo`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Target person.
	pub person_id: String,
}

/// Body of a [`Endpoint::DelPerson`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelPersonBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Number of people removed.
	pub deleted: i32,
}
/// Response of [`Endpoint::DelPerson`].
pub type DelPersonResponse = Envelope<DelPersonBody>;

/// Request body for [`Endpoint::AddFace`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddFaceRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Target person.
	pub person_id: String,
	/// Base64-encoded images, one face each.
	pub images: Vec<String>,
	/// Free-form tag applied to the new faces.
	pub tag: String,
}

/// Body of a [`Endpoint::AddFace`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddFaceBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Number of faces stored.
	pub added: i32,
	/// Identifiers of the stored faces.
	pub face_ids: Vec<String>,
}
/// Response of [`Endpoint::AddFace`].
pub type AddFaceResponse = Envelope<AddFaceBody>;

/// Request body for [`Endpoint::DelFace`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelFaceRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Target person.
	pub person_id: String,
	/// Faces to remove.
	pub face_ids: Vec<String>,
}

/// Body of a [`Endpoint::DelFace`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelFaceBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Number of faces removed.
	pub deleted: i32,
}
/// Response of [`Endpoint::DelFace`].
pub type DelFaceResponse = Envelope<DelFaceBody>;

/// Request body for [`Endpoint::SetInfo`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInfoRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Target person.
	pub person_id: String,
	/// New display name.
	pub person_name: String,
	/// New tag.
	pub tag: String,
}

/// Body of a [`Endpoint::SetInfo`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetInfoBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Updated person.
	pub person_id: String,
}
/// Response of [`Endpoint::SetInfo`].
pub type SetInfoResponse = Envelope<SetInfoBody>;

/// Body of a [`Endpoint::GetInfo`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetInfoBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Display name.
	pub person_name: String,
	/// Person identifier.
	pub person_id: String,
	/// Groups the person belongs to.
	pub group_ids: Vec<String>,
	/// Faces stored for the person.
	pub face_ids: Vec<String>,
	/// Free-form tag.
	pub tag: String,
}
/// Response of [`Endpoint::GetInfo`].
pub type GetInfoResponse = Envelope<GetInfoBody>;

/// Request body for [`Endpoint::GetGroupIds`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRequest {
	/// Decimal application id.
	pub app_id: String,
}

/// Body of a [`Endpoint::GetGroupIds`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupIdsBody {
	/// Groups owned by the application.
	pub group_ids: Vec<String>,
}
/// Response of [`Endpoint::GetGroupIds`].
pub type GetGroupIdsResponse = Envelope<GroupIdsBody>;

/// Request body for [`Endpoint::GetPersonIds`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Target group.
	pub group_id: String,
}

/// Body of a [`Endpoint::GetPersonIds`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonIdsBody {
	/// People in the group.
	pub person_ids: Vec<String>,
}
/// Response of [`Endpoint::GetPersonIds`].
pub type GetPersonIdsResponse = Envelope<PersonIdsBody>;

/// Body of a [`Endpoint::GetFaceIds`] response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceIdsBody {
	/// Faces stored for the person.
	pub face_ids: Vec<String>,
}
/// Response of [`Endpoint::GetFaceIds`].
pub type GetFaceIdsResponse = Envelope<FaceIdsBody>;

impl<C, M> Dispatcher<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Registers a person with the face in a base64-encoded image.
	pub fn new_person<I, S>(
		&self,
		image: impl Into<String>,
		person_id: impl Into<String>,
		group_ids: I,
		person_name: impl Into<String>,
		tag: impl Into<String>,
	) -> Result<NewPersonResponse>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let request = NewPersonRequest {
			app_id: self.app_id(),
			image: image.into(),
			person_id: person_id.into(),
			group_ids: group_ids.into_iter().map(Into::into).collect(),
			person_name: person_name.into(),
			tag: tag.into(),
		};

		self.call(Endpoint::NewPerson.as_str(), &request)
	}

	/// Removes `person_id`.
	pub fn del_person(&self, person_id: impl Into<String>) -> Result<DelPersonResponse> {
		let request = PersonRequest { app_id: self.app_id(), person_id: person_id.into() };

		self.call(Endpoint::DelPerson.as_str(), &request)
	}

	/// Adds the faces in base64-encoded `images` to `person_id`.
	pub fn add_face<I, S>(
		&self,
		person_id: impl Into<String>,
		images: I,
		tag: impl Into<String>,
	) -> Result<AddFaceResponse>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let request = AddFaceRequest {
			app_id: self.app_id(),
			person_id: person_id.into(),
			images: images.into_iter().map(Into::into).collect(),
			tag: tag.into(),
		};

		self.call(Endpoint::AddFace.as_str(), &request)
	}

	/// Removes `face_ids` from `person_id`.
	pub fn del_face<I, S>(
		&self,
		person_id: impl Into<String>,
		face_ids: I,
	) -> Result<DelFaceResponse>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let request = DelFaceRequest {
			app_id: self.app_id(),
			person_id: person_id.into(),
			face_ids: face_ids.into_iter().map(Into::into).collect(),
		};

		self.call(Endpoint::DelFace.as_str(), &request)
	}

	/// Updates the name and tag of `person_id`.
	pub fn set_info(
		&self,
		person_id: impl Into<String>,
		person_name: impl Into<String>,
		tag: impl Into<String>,
	) -> Result<SetInfoResponse> {
		let request = SetInfoRequest {
			app_id: self.app_id(),
			person_id: person_id.into(),
			person_name: person_name.into(),
			tag: tag.into(),
		};

		self.call(Endpoint::SetInfo.as_str(), &request)
	}

	/// Reads the name, tag, groups, and faces of `person_id`.
	pub fn get_info(&self, person_id: impl Into<String>) -> Result<GetInfoResponse> {
		let request = PersonRequest { app_id: self.app_id(), person_id: person_id.into() };

		self.call(Endpoint::GetInfo.as_str(), &request)
	}

	/// Lists the application's groups.
	pub fn get_group_ids(&self) -> Result<GetGroupIdsResponse> {
		self.call(Endpoint::GetGroupIds.as_str(), &AppRequest { app_id: self.app_id() })
	}

	/// Lists the people in `group_id`.
	pub fn get_person_ids(&self, group_id: impl Into<String>) -> Result<GetPersonIdsResponse> {
		let request = GroupRequest { app_id: self.app_id(), group_id: group_id.into() };

		self.call(Endpoint::GetPersonIds.as_str(), &request)
	}

	/// Lists the faces stored for `person_id`.
	pub fn get_face_ids(&self, person_id: impl Into<String>) -> Result<GetFaceIdsResponse> {
		let request = PersonRequest { app_id: self.app_id(), person_id: person_id.into() };

		self.call(Endpoint::GetFaceIds.as_str(), &request)
	}
}
