use async_trait::async_trait;
use diesel::result;

/// Common CRUD surface shared by the entity repos. Repos with bespoke
/// multi-statement operations (cart merge, checkout) add inherent methods
/// on top of this.
#[async_trait]
pub trait Repository {
    type Id;
    type Item;
    type NewItem<'a>: Send;
    type UpdateForm<'a>: Send;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error>;
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error>;
    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error>;
    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error>;
    async fn delete(&self, id: Self::Id) -> Result<(), result::Error>;
}
