//! Built-in directory data: tools, facets and glossary.

use super::types::{
    Category, CategoryInfo, Facets, GlossaryTerm, PopularTask, Pricing, ProfessionFilter,
    ToolRecord,
};
use Category::{
    Audio, Chat, Coding, Data, Images, Marketing, Presentations, Productivity, Research, ThreeD,
    Video,
};
use Pricing::{Free, Freemium, Paid};

struct ToolSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    description_es: &'static str,
    category: Category,
    pricing: Pricing,
    rating: Option<f32>,
    featured: bool,
    trending: bool,
    is_new: bool,
    url: &'static str,
    icon: &'static str,
}

const fn seed(
    id: &'static str,
    name: &'static str,
    category: Category,
    pricing: Pricing,
    rating: Option<f32>,
    (featured, trending, is_new): (bool, bool, bool),
    url: &'static str,
    icon: &'static str,
    (description, description_es): (&'static str, &'static str),
) -> ToolSeed {
    ToolSeed {
        id,
        name,
        description,
        description_es,
        category,
        pricing,
        rating,
        featured,
        trending,
        is_new,
        url,
        icon,
    }
}

const NONE: (bool, bool, bool) = (false, false, false);

const TOOLS: &[ToolSeed] = &[
    // Chat & assistants
    seed("chatgpt", "ChatGPT", Chat, Freemium, Some(4.8), (true, true, false),
        "https://chat.openai.com", "💬",
        ("OpenAI's conversational assistant for writing, analysis and everyday questions.",
         "El asistente conversacional de OpenAI para escribir, analizar y resolver dudas.")),
    seed("claude", "Claude", Chat, Freemium, Some(4.8), (true, true, false),
        "https://claude.ai", "🧠",
        ("Anthropic's assistant with long context for documents, code and reasoning.",
         "El asistente de Anthropic con contexto largo para documentos, código y razonamiento.")),
    seed("gemini", "Gemini", Chat, Freemium, Some(4.6), (false, true, false),
        "https://gemini.google.com", "✨",
        ("Google's multimodal assistant integrated with Workspace.",
         "El asistente multimodal de Google integrado con Workspace.")),
    seed("perplexity", "Perplexity", Research, Freemium, Some(4.7), (true, true, false),
        "https://www.perplexity.ai", "🔎",
        ("Answer engine that cites its sources in real time.",
         "Motor de respuestas que cita sus fuentes en tiempo real.")),
    seed("mistral-le-chat", "Le Chat", Chat, Free, Some(4.4), (false, false, true),
        "https://chat.mistral.ai", "🌬️",
        ("Mistral's fast assistant with web search and canvas.",
         "El asistente rápido de Mistral con búsqueda web y lienzo.")),
    seed("deepseek", "DeepSeek", Chat, Free, Some(4.5), (false, true, true),
        "https://chat.deepseek.com", "🐋",
        ("Open-weight reasoning model with a free chat interface.",
         "Modelo de razonamiento de pesos abiertos con chat gratuito.")),
    // Images
    seed("midjourney", "Midjourney", Images, Paid, Some(4.7), (true, true, false),
        "https://www.midjourney.com", "🎨",
        ("Artistic image generation from text prompts.",
         "Generación artística de imágenes a partir de texto.")),
    seed("dall-e", "DALL·E 3", Images, Freemium, Some(4.5), NONE,
        "https://openai.com/dall-e-3", "🖼️",
        ("Image generation that follows detailed prompts closely.",
         "Generación de imágenes que sigue fielmente instrucciones detalladas.")),
    seed("leonardo", "Leonardo.Ai", Images, Freemium, Some(4.5), (false, true, false),
        "https://leonardo.ai", "🦁",
        ("Image and asset generation for games and concept art.",
         "Generación de imágenes y recursos para videojuegos y arte conceptual.")),
    seed("ideogram", "Ideogram", Images, Freemium, Some(4.4), (false, false, true),
        "https://ideogram.ai", "🔤",
        ("Image generator known for legible typography.",
         "Generador de imágenes conocido por su tipografía legible.")),
    seed("stable-diffusion", "Stable Diffusion", Images, Free, Some(4.3), NONE,
        "https://stability.ai", "🌀",
        ("Open image model you can run locally.",
         "Modelo de imagen abierto que puedes ejecutar en local.")),
    // Video
    seed("runway", "Runway", Video, Freemium, Some(4.6), (true, true, false),
        "https://runwayml.com", "🎬",
        ("Text-to-video generation and AI video editing.",
         "Generación de vídeo desde texto y edición de vídeo con IA.")),
    seed("pika", "Pika", Video, Freemium, Some(4.3), (false, true, true),
        "https://pika.art", "⚡",
        ("Short video clips generated from text or images.",
         "Clips cortos de vídeo generados desde texto o imágenes.")),
    seed("synthesia", "Synthesia", Video, Paid, Some(4.5), NONE,
        "https://www.synthesia.io", "🧑‍💼",
        ("Presenter videos with AI avatars in 120+ languages.",
         "Vídeos con presentadores avatar en más de 120 idiomas.")),
    seed("heygen", "HeyGen", Video, Freemium, Some(4.6), (false, false, true),
        "https://www.heygen.com", "🎥",
        ("Avatar videos and lip-synced translation.",
         "Vídeos con avatares y traducción con sincronización labial.")),
    // Audio
    seed("elevenlabs", "ElevenLabs", Audio, Freemium, Some(4.8), (true, true, false),
        "https://elevenlabs.io", "🎙️",
        ("Natural text-to-speech and voice cloning.",
         "Texto a voz natural y clonación de voz.")),
    seed("suno", "Suno", Audio, Freemium, Some(4.7), (true, true, true),
        "https://suno.com", "🎵",
        ("Full songs with vocals generated from a prompt.",
         "Canciones completas con voz generadas desde una instrucción.")),
    seed("udio", "Udio", Audio, Freemium, Some(4.4), (false, false, true),
        "https://www.udio.com", "🎶",
        ("Music generation with fine control over style.",
         "Generación musical con control fino del estilo.")),
    seed("descript", "Descript", Audio, Freemium, Some(4.5), NONE,
        "https://www.descript.com", "✂️",
        ("Edit audio and video by editing the transcript.",
         "Edita audio y vídeo editando la transcripción.")),
    // Coding
    seed("github-copilot", "GitHub Copilot", Coding, Paid, Some(4.7), (true, true, false),
        "https://github.com/features/copilot", "🤖",
        ("Code completion and chat inside your editor.",
         "Autocompletado de código y chat dentro de tu editor.")),
    seed("cursor", "Cursor", Coding, Freemium, Some(4.8), (true, true, true),
        "https://www.cursor.com", "⌨️",
        ("AI-first code editor with multi-file edits.",
         "Editor de código centrado en IA con ediciones multiarchivo.")),
    seed("replit", "Replit", Coding, Freemium, Some(4.4), NONE,
        "https://replit.com", "🔁",
        ("Build and deploy apps from the browser with an AI agent.",
         "Crea y despliega apps desde el navegador con un agente de IA.")),
    seed("tabnine", "Tabnine", Coding, Freemium, Some(4.2), NONE,
        "https://www.tabnine.com", "🧩",
        ("Private code completion for teams.",
         "Autocompletado de código privado para equipos.")),
    seed("v0", "v0", Coding, Freemium, Some(4.5), (false, true, true),
        "https://v0.dev", "▲",
        ("Generate React UI components from a description.",
         "Genera componentes de interfaz React desde una descripción.")),
    // Productivity & writing
    seed("notion-ai", "Notion AI", Productivity, Paid, Some(4.5), (true, false, false),
        "https://www.notion.so/product/ai", "📝",
        ("Writing, summaries and Q&A across your workspace.",
         "Redacción, resúmenes y preguntas sobre tu espacio de trabajo.")),
    seed("grammarly", "Grammarly", Productivity, Freemium, Some(4.6), NONE,
        "https://www.grammarly.com", "✍️",
        ("Grammar, tone and clarity suggestions as you type.",
         "Sugerencias de gramática, tono y claridad mientras escribes.")),
    seed("jasper", "Jasper", Marketing, Paid, Some(4.3), NONE,
        "https://www.jasper.ai", "📣",
        ("Brand-consistent marketing copy at scale.",
         "Textos de marketing coherentes con la marca a escala.")),
    seed("otter", "Otter.ai", Productivity, Freemium, Some(4.4), NONE,
        "https://otter.ai", "🦦",
        ("Meeting transcription and automatic notes.",
         "Transcripción de reuniones y notas automáticas.")),
    // Presentations
    seed("gamma", "Gamma", Presentations, Freemium, Some(4.6), (true, true, false),
        "https://gamma.app", "📊",
        ("Decks, documents and web pages from a prompt.",
         "Presentaciones, documentos y webs desde una instrucción.")),
    seed("beautiful-ai", "Beautiful.ai", Presentations, Paid, Some(4.3), NONE,
        "https://www.beautiful.ai", "💎",
        ("Slides that lay themselves out as you add content.",
         "Diapositivas que se maquetan solas mientras añades contenido.")),
    seed("tome", "Tome", Presentations, Freemium, Some(4.1), NONE,
        "https://tome.app", "📚",
        ("Narrative presentations generated with AI.",
         "Presentaciones narrativas generadas con IA.")),
    // Data & analytics
    seed("julius", "Julius AI", Data, Freemium, Some(4.5), (false, false, true),
        "https://julius.ai", "📈",
        ("Chat with spreadsheets and get charts.",
         "Conversa con hojas de cálculo y obtén gráficos.")),
    seed("tableau-pulse", "Tableau Pulse", Data, Paid, Some(4.2), NONE,
        "https://www.tableau.com", "📉",
        ("Automated metric insights for business teams.",
         "Información automática de métricas para equipos de negocio.")),
    // 3D & design
    seed("meshy", "Meshy", ThreeD, Freemium, Some(4.4), (false, true, true),
        "https://www.meshy.ai", "🧊",
        ("Text and image to textured 3D models.",
         "De texto o imagen a modelos 3D con texturas.")),
    seed("spline-ai", "Spline AI", ThreeD, Freemium, Some(4.3), NONE,
        "https://spline.design/ai", "🌐",
        ("Generate 3D scenes and objects for the web.",
         "Genera escenas y objetos 3D para la web.")),
    seed("canva-magic", "Canva Magic Studio", ThreeD, Freemium, Some(4.6), (true, false, false),
        "https://www.canva.com/magic", "🪄",
        ("Design suite with generative fill, resize and copy.",
         "Suite de diseño con relleno generativo, redimensionado y textos.")),
    // Marketing & SEO
    seed("surfer-seo", "Surfer SEO", Marketing, Paid, Some(4.4), NONE,
        "https://surferseo.com", "🏄",
        ("Content optimization against search rankings.",
         "Optimización de contenido según el posicionamiento en buscadores.")),
    seed("copy-ai", "Copy.ai", Marketing, Freemium, Some(4.2), NONE,
        "https://www.copy.ai", "📋",
        ("Sales and marketing workflows powered by AI.",
         "Flujos de ventas y marketing impulsados por IA.")),
    // Research & academic
    seed("elicit", "Elicit", Research, Freemium, Some(4.5), NONE,
        "https://elicit.com", "🔬",
        ("Search and summarize academic papers.",
         "Busca y resume artículos académicos.")),
    seed("consensus", "Consensus", Research, Freemium, Some(4.4), (false, false, true),
        "https://consensus.app", "🎓",
        ("Evidence-based answers from peer-reviewed research.",
         "Respuestas basadas en evidencia de investigación revisada.")),
    seed("notebooklm", "NotebookLM", Research, Free, Some(4.7), (true, true, true),
        "https://notebooklm.google.com", "📓",
        ("Research notebook grounded in your own sources.",
         "Cuaderno de investigación basado en tus propias fuentes.")),
];

/// The built-in tool catalog in display order.
pub fn builtin_tools() -> Vec<ToolRecord> {
    TOOLS
        .iter()
        .map(|s| ToolRecord {
            id: s.id.to_string(),
            name: s.name.to_string(),
            description: s.description.to_string(),
            description_es: s.description_es.to_string(),
            category: s.category,
            pricing: s.pricing,
            rating: s.rating,
            featured: s.featured,
            trending: s.trending,
            is_new: s.is_new,
            url: s.url.to_string(),
            icon: s.icon.to_string(),
            affiliate_url: None,
        })
        .collect()
}

fn category_info(id: &str, icon: &str, name: &str, name_es: &str) -> CategoryInfo {
    CategoryInfo {
        id: id.to_string(),
        icon: icon.to_string(),
        name: name.to_string(),
        name_es: name_es.to_string(),
    }
}

fn task(id: &str, icon: &str, name: &str, name_es: &str, categories: &[Category]) -> PopularTask {
    PopularTask {
        id: id.to_string(),
        name: name.to_string(),
        name_es: name_es.to_string(),
        icon: icon.to_string(),
        categories: categories.to_vec(),
    }
}

fn profession(
    id: &str,
    icon: &str,
    name: &str,
    name_es: &str,
    categories: &[Category],
) -> ProfessionFilter {
    ProfessionFilter {
        id: id.to_string(),
        name: name.to_string(),
        name_es: name_es.to_string(),
        icon: icon.to_string(),
        categories: categories.to_vec(),
    }
}

fn glossary(
    id: &str,
    term: &str,
    category: &str,
    definition: &str,
    definition_es: &str,
    related: &[&str],
) -> GlossaryTerm {
    GlossaryTerm {
        id: id.to_string(),
        term: term.to_string(),
        definition: definition.to_string(),
        definition_es: definition_es.to_string(),
        category: category.to_string(),
        related_terms: related.iter().map(|r| r.to_string()).collect(),
    }
}

/// Built-in facets: category chips, task and profession shortcuts, glossary.
pub fn builtin_facets() -> Facets {
    let categories = vec![
        category_info("all", "🌐", "All Tools", "Todas las herramientas"),
        category_info("audio", "🎧", "Audio", "Audio"),
        category_info("images", "🎨", "Images & Art", "Imágenes y arte"),
        category_info("video", "🎬", "Video", "Vídeo"),
        category_info("chat", "💬", "Chat & Assistants", "Chat y asistentes"),
        category_info("coding", "💻", "Coding", "Programación"),
        category_info("productivity", "⚡", "Productivity & Writing", "Productividad y escritura"),
        category_info("presentations", "📊", "Presentations", "Presentaciones"),
        category_info("data", "📈", "Data & Analytics", "Datos y analítica"),
        category_info("3d", "🧊", "3D & Design", "3D y diseño"),
        category_info("marketing", "📣", "Marketing & SEO", "Marketing y SEO"),
        category_info("research", "🔬", "Research & Academic", "Investigación y academia"),
    ];

    let popular_tasks = vec![
        task("write-code", "💻", "Write code", "Escribir código", &[Coding]),
        task("create-images", "🎨", "Create images", "Crear imágenes", &[Images, ThreeD]),
        task("make-videos", "🎬", "Make videos", "Hacer vídeos", &[Video]),
        task("voice-music", "🎵", "Voice & music", "Voz y música", &[Audio]),
        task("write-content", "✍️", "Write content", "Escribir contenido", &[Productivity, Marketing, Chat]),
        task("build-slides", "📊", "Build slides", "Crear presentaciones", &[Presentations]),
        task("analyze-data", "📈", "Analyze data", "Analizar datos", &[Data]),
        task("do-research", "🔬", "Do research", "Investigar", &[Research, Chat]),
    ];

    let profession_filters = vec![
        profession("developer", "👩‍💻", "Developers", "Desarrolladores", &[Coding, Data]),
        profession("designer", "🎨", "Designers", "Diseñadores", &[Images, ThreeD, Presentations]),
        profession("marketer", "📣", "Marketers", "Marketing", &[Marketing, Productivity, Images]),
        profession("creator", "🎥", "Content creators", "Creadores de contenido", &[Video, Audio, Images]),
        profession("student", "🎓", "Students", "Estudiantes", &[Research, Chat, Productivity]),
        profession("analyst", "📊", "Analysts", "Analistas", &[Data, Research]),
    ];

    let ai_glossary = vec![
        glossary("artificial-intelligence", "Artificial Intelligence (AI)", "ai-fundamentals",
            "The simulation of human intelligence processes by machines, including learning, reasoning and self-correction.",
            "La simulación de procesos de inteligencia humana por máquinas, incluyendo aprendizaje, razonamiento y autocorrección.",
            &["machine-learning", "deep-learning"]),
        glossary("machine-learning", "Machine Learning", "machine-learning",
            "Algorithms that improve at a task by learning patterns from data instead of explicit rules.",
            "Algoritmos que mejoran en una tarea aprendiendo patrones de los datos en lugar de reglas explícitas.",
            &["artificial-intelligence", "deep-learning"]),
        glossary("deep-learning", "Deep Learning", "deep-learning",
            "Machine learning with many-layered neural networks.",
            "Aprendizaje automático con redes neuronales de muchas capas.",
            &["neural-network", "machine-learning"]),
        glossary("neural-network", "Neural Network", "neural-networks",
            "A model of connected units whose weights are adjusted during training.",
            "Un modelo de unidades conectadas cuyos pesos se ajustan durante el entrenamiento.",
            &["deep-learning", "transformer"]),
        glossary("llm", "Large Language Model (LLM)", "nlp",
            "A language model trained on large text corpora to predict and generate text.",
            "Un modelo de lenguaje entrenado con grandes corpus de texto para predecir y generar texto.",
            &["transformer", "prompt"]),
        glossary("transformer", "Transformer", "deep-learning",
            "Neural architecture based on attention, the basis of modern LLMs.",
            "Arquitectura neuronal basada en atención, la base de los LLM modernos.",
            &["llm", "attention"]),
        glossary("prompt", "Prompt", "generative-ai",
            "The instruction or input given to a generative model.",
            "La instrucción o entrada que se da a un modelo generativo.",
            &["prompt-engineering", "llm"]),
        glossary("prompt-engineering", "Prompt Engineering", "generative-ai",
            "Designing prompts to obtain reliable, useful model output.",
            "Diseñar instrucciones para obtener respuestas fiables y útiles del modelo.",
            &["prompt"]),
        glossary("hallucination", "Hallucination", "ethics",
            "Model output that is fluent but factually wrong or unsupported.",
            "Respuesta del modelo fluida pero incorrecta o sin fundamento.",
            &["llm", "rag"]),
        glossary("rag", "Retrieval-Augmented Generation (RAG)", "applications",
            "Generating answers grounded in documents retrieved at query time.",
            "Generar respuestas basadas en documentos recuperados en el momento de la consulta.",
            &["llm", "embedding"]),
        glossary("embedding", "Embedding", "nlp",
            "A vector representation of text or media used for similarity search.",
            "Una representación vectorial de texto o medios usada para búsqueda por similitud.",
            &["rag"]),
        glossary("diffusion-model", "Diffusion Model", "computer-vision",
            "A generative model that creates images by iteratively removing noise.",
            "Un modelo generativo que crea imágenes eliminando ruido de forma iterativa.",
            &["generative-ai"]),
    ];

    Facets {
        categories,
        popular_tasks,
        profession_filters,
        ai_glossary,
    }
}
