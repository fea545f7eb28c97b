use crate::store::database::MoleculeDatabase;
use crate::store::recipe::PropertyRecipe;
use ndarray::Array2;
use tracing::trace;

/// Collects the known values of several properties for every molecule that has all of them.
///
/// Rows follow the iteration order of the database and columns follow the order of
/// `recipes`. A molecule missing any one property is left out entirely.
///
/// # Return
///
/// An array of shape `(molecules with complete data, recipes.len())`. When no molecule
/// qualifies the array has zero rows; that is not treated as an error here.
pub fn extract_observations<R: PropertyRecipe>(
    database: &MoleculeDatabase,
    recipes: &[R],
) -> Array2<f64> {
    let rows: Vec<Vec<f64>> = database
        .records()
        .filter_map(|record| {
            recipes
                .iter()
                .map(|recipe| recipe.lookup(record))
                .collect::<Option<Vec<f64>>>()
        })
        .collect();

    trace!(
        num_records = database.len(),
        num_complete = rows.len(),
        "Extracted observations from database."
    );

    Array2::from_shape_fn((rows.len(), recipes.len()), |(i, j)| rows[i][j])
}
