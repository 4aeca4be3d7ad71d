/// Playlist visibility levels as stored in both the engine documents and the
/// primary store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
	Public,
	Private,
}
impl Visibility {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Public => "public",
			Self::Private => "private",
		}
	}
}
