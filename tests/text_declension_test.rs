use declension::core::casing::restore_casing;
use declension::domain::model::{Case, DeclensionRequest, NewException, Number};
use declension::{
    DeclensionEngine, ExceptionResolver, LexiconMorphology, MemoryExceptionStore, TemplateNames,
};
use std::sync::Arc;

fn engine() -> anyhow::Result<DeclensionEngine<MemoryExceptionStore, LexiconMorphology>> {
    Ok(DeclensionEngine::new(
        ExceptionResolver::new(Arc::new(MemoryExceptionStore::new())),
        Arc::new(LexiconMorphology::embedded()?),
        TemplateNames::default(),
    ))
}

#[tokio::test]
async fn test_date_with_month_as_word() -> anyhow::Result<()> {
    let request = DeclensionRequest::new(Case::Gent).for_text("21 августа 2021");
    let result = engine()?.inflect_text(&request).await?;
    assert_eq!(result.result, "21 августа 2021");
    Ok(())
}

#[tokio::test]
async fn test_name_as_plain_text() -> anyhow::Result<()> {
    let request = DeclensionRequest::new(Case::Gent).for_text("Иванов Иван Иванович");
    let result = engine()?.inflect_text(&request).await?;
    assert_eq!(result.result, "Иванова Ивана Ивановича");
    Ok(())
}

#[tokio::test]
async fn test_plural_with_hyphenated_adjective() -> anyhow::Result<()> {
    let request = DeclensionRequest::new(Case::Datv)
        .with_number(Number::Plur)
        .for_text("Сибирский торгово-промышленный");
    let result = engine()?.inflect_text(&request).await?;
    assert_eq!(result.result, "Сибирским торгово-промышленным");
    Ok(())
}

#[tokio::test]
async fn test_unknown_short_words_stay_as_written() -> anyhow::Result<()> {
    let request = DeclensionRequest::new(Case::Gent).for_text("Красивый дом");
    let result = engine()?.inflect_text(&request).await?;
    assert_eq!(result.result, "Красивый дом");
    Ok(())
}

#[tokio::test]
async fn test_casing_is_restored_per_word() -> anyhow::Result<()> {
    let request = DeclensionRequest::new(Case::Datv).for_text("ООО Пельмень Иван");
    let result = engine()?.inflect_text(&request).await?;
    assert_eq!(result.result, "ООО Пельменю Ивану");

    assert_eq!(
        restore_casing("ООО Пельмень Иван", "ооо пельменю ивану", " "),
        "ООО Пельменю Ивану"
    );
    Ok(())
}

#[tokio::test]
async fn test_word_exception_replaces_single_word() -> anyhow::Result<()> {
    let engine = engine()?;
    let params = DeclensionRequest::new(Case::Gent);
    engine
        .exceptions()
        .create(NewException {
            source_text: "Арбуз".to_string(),
            target_text: "арбузика".to_string(),
            params: params.clone(),
        })
        .await?;

    let result = engine.inflect_text(&params.for_text("Арбуз Иван")).await?;
    assert_eq!(result.result, "Арбузика Ивана");
    Ok(())
}

#[tokio::test]
async fn test_whole_text_exception_is_returned_verbatim() -> anyhow::Result<()> {
    let engine = engine()?;
    let params = DeclensionRequest::new(Case::Gent).with_system("ГКУ");
    engine
        .exceptions()
        .create(NewException {
            source_text: "ООО Ромашка".to_string(),
            target_text: "ООО «Ромашка»".to_string(),
            params: params.clone(),
        })
        .await?;

    let result = engine.inflect_text(&params.clone().for_text("ООО Ромашка")).await?;
    assert_eq!(result.result, "ООО «Ромашка»");

    let other_system = DeclensionRequest::new(Case::Gent).for_text("ООО Ромашка");
    let result = engine.inflect_text(&other_system).await?;
    assert_eq!(result.result, "ООО Ромашка");
    Ok(())
}
