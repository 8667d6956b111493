use anyhow::Context;
use anyhow::Result;
use clap::Args;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::runtime::Error;
use crate::utils::{check_tools, quote_path, quote_word, CommandRunner, ShellRunner};

pub const DIR_QC: &str = "qc";
pub const DIR_ASSEMBLY: &str = "assembly";
pub const DIR_ANNOTATION: &str = "annotation";
pub const FILE_TRIMMED: &str = "trimmed.fastq";
pub const FILE_ALIGNED_SAM: &str = "aligned.sam";
pub const FILE_ALIGNED_BAM: &str = "aligned.bam";
pub const FILE_SORTED_BAM: &str = "aligned_sorted.bam";

pub const MSG_PIPELINE_COMPLETE: &str = "Pipeline complete.";

#[derive(Args)]
pub struct GenomeSequencingCMD {
    /// FASTQ file with the raw single-end reads
    #[arg(value_parser = clap::value_parser!(PathBuf))]
    pub input_file: PathBuf,

    /// FASTA file of the reference genome. bwa writes its index next to it
    #[arg(value_parser = clap::value_parser!(PathBuf))]
    pub reference_genome: PathBuf,

    /// FASTA file of adapter sequences for trimming
    #[arg(value_parser = clap::value_parser!(PathBuf))]
    pub adapter_file: PathBuf,

    /// Directory to store all results in. Created if missing
    #[arg(value_parser = clap::value_parser!(PathBuf))]
    pub output_dir: PathBuf,
}

impl GenomeSequencingCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let pipeline = GenomeSequencing::new(
            &self.input_file,
            &self.reference_genome,
            &self.adapter_file,
            &self.output_dir,
        )?;

        pipeline.run_pipeline(&mut ShellRunner::new())?;

        log::debug!("Results are in {}", pipeline.output_dir.display());
        Ok(())
    }
}

/// One step of the pipeline. Variants are listed in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    QualityControl,
    TrimReads,
    AlignReads,
    ConvertToBam,
    SortBam,
    AssembleGenome,
    AnnotateGenome,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::QualityControl,
        Stage::TrimReads,
        Stage::AlignReads,
        Stage::ConvertToBam,
        Stage::SortBam,
        Stage::AssembleGenome,
        Stage::AnnotateGenome,
    ];

    pub fn start_message(&self) -> &'static str {
        match self {
            Stage::QualityControl => "Running FastQC...",
            Stage::TrimReads => "Running Trimmomatic...",
            Stage::AlignReads => "Running BWA...",
            Stage::ConvertToBam => "Converting SAM to BAM...",
            Stage::SortBam => "Sorting BAM file...",
            Stage::AssembleGenome => "Running SPAdes...",
            Stage::AnnotateGenome => "Running Bakta...",
        }
    }

    pub fn done_message(&self) -> &'static str {
        match self {
            Stage::QualityControl => "FastQC complete.",
            Stage::TrimReads => "Trimmomatic complete.",
            Stage::AlignReads => "BWA alignment complete.",
            Stage::ConvertToBam => "Conversion to BAM complete.",
            Stage::SortBam => "Sorting BAM complete.",
            Stage::AssembleGenome => "SPAdes genome assembly complete.",
            Stage::AnnotateGenome => "Bakta annotation complete.",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::QualityControl => "Quality control",
            Stage::TrimReads => "Trim reads",
            Stage::AlignReads => "Align reads",
            Stage::ConvertToBam => "Convert alignment",
            Stage::SortBam => "Sort alignment",
            Stage::AssembleGenome => "Assemble genome",
            Stage::AnnotateGenome => "Annotate genome",
        };
        write!(f, "{}", name)
    }
}

/// Inputs of one pipeline run, plus every path derived from the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenomeSequencing {
    pub input_file: PathBuf,
    pub reference_genome: PathBuf,
    pub adapter_file: PathBuf,
    pub output_dir: PathBuf,

    pub qc_output_dir: PathBuf,
    pub trimmed_output_file: PathBuf,
    pub aligned_output_file: PathBuf,
    pub bam_output_file: PathBuf,
    pub sorted_bam_output_file: PathBuf,
    pub assembly_output_dir: PathBuf,
    pub annotation_output_dir: PathBuf,
}

impl GenomeSequencing {
    const FASTQC_CMD: &str = "fastqc";
    const TRIMMOMATIC_CMD: &str = "trimmomatic";
    const BWA_CMD: &str = "bwa";
    const SAMTOOLS_CMD: &str = "samtools";
    const SPADES_CMD: &str = "spades.py";
    const BAKTA_CMD: &str = "bakta";

    const TRIMMOMATIC_CLIP_SETTINGS: &str = "2:30:10";
    const TRIMMOMATIC_STEPS: &str = "LEADING:3 TRAILING:3 SLIDINGWINDOW:4:15 MINLEN:36";
    const BAKTA_PREFIX: &str = "annotation";

    pub const REQUIRED_TOOLS: [&str; 6] = [
        Self::FASTQC_CMD,
        Self::TRIMMOMATIC_CMD,
        Self::BWA_CMD,
        Self::SAMTOOLS_CMD,
        Self::SPADES_CMD,
        Self::BAKTA_CMD,
    ];

    /// Derive all paths and create the output directory tree
    pub fn new<P: AsRef<Path>>(
        input_file: P,
        reference_genome: P,
        adapter_file: P,
        output_dir: P,
    ) -> Result<Self> {
        let pipeline = Self::with_paths(input_file, reference_genome, adapter_file, output_dir);
        pipeline.create_output_dirs()?;
        Ok(pipeline)
    }

    /// Derive all paths without touching the file system
    pub fn with_paths<P: AsRef<Path>>(
        input_file: P,
        reference_genome: P,
        adapter_file: P,
        output_dir: P,
    ) -> Self {
        let output_dir = output_dir.as_ref().to_path_buf();
        Self {
            input_file: input_file.as_ref().to_path_buf(),
            reference_genome: reference_genome.as_ref().to_path_buf(),
            adapter_file: adapter_file.as_ref().to_path_buf(),
            qc_output_dir: output_dir.join(DIR_QC),
            trimmed_output_file: output_dir.join(FILE_TRIMMED),
            aligned_output_file: output_dir.join(FILE_ALIGNED_SAM),
            bam_output_file: output_dir.join(FILE_ALIGNED_BAM),
            sorted_bam_output_file: output_dir.join(FILE_SORTED_BAM),
            assembly_output_dir: output_dir.join(DIR_ASSEMBLY),
            annotation_output_dir: output_dir.join(DIR_ANNOTATION),
            output_dir,
        }
    }

    fn create_output_dirs(&self) -> Result<()> {
        for dir in [
            &self.output_dir,
            &self.qc_output_dir,
            &self.assembly_output_dir,
            &self.annotation_output_dir,
        ] {
            fs::create_dir_all(dir)
                .map_err(|e| Error::directory_not_created(dir, Some(e.to_string())))?;
        }
        Ok(())
    }

    /// The command lines a stage issues, in order
    pub fn stage_commands(&self, stage: Stage) -> Vec<String> {
        match stage {
            Stage::QualityControl => vec![format!(
                "{} {} -o {}",
                Self::FASTQC_CMD,
                quote_path(&self.input_file),
                quote_path(&self.qc_output_dir)
            )],
            Stage::TrimReads => {
                let clip = format!(
                    "ILLUMINACLIP:{}:{}",
                    self.adapter_file.to_string_lossy(),
                    Self::TRIMMOMATIC_CLIP_SETTINGS
                );
                vec![format!(
                    "{} SE -phred33 {} {} {} {}",
                    Self::TRIMMOMATIC_CMD,
                    quote_path(&self.input_file),
                    quote_path(&self.trimmed_output_file),
                    quote_word(&clip),
                    Self::TRIMMOMATIC_STEPS
                )]
            }
            Stage::AlignReads => vec![
                format!(
                    "{} index {}",
                    Self::BWA_CMD,
                    quote_path(&self.reference_genome)
                ),
                format!(
                    "{} mem {} {} > {}",
                    Self::BWA_CMD,
                    quote_path(&self.reference_genome),
                    quote_path(&self.trimmed_output_file),
                    quote_path(&self.aligned_output_file)
                ),
            ],
            Stage::ConvertToBam => vec![format!(
                "{} view -S -b {} > {}",
                Self::SAMTOOLS_CMD,
                quote_path(&self.aligned_output_file),
                quote_path(&self.bam_output_file)
            )],
            Stage::SortBam => vec![format!(
                "{} sort {} -o {}",
                Self::SAMTOOLS_CMD,
                quote_path(&self.bam_output_file),
                quote_path(&self.sorted_bam_output_file)
            )],
            Stage::AssembleGenome => vec![format!(
                "{} -s {} -o {}",
                Self::SPADES_CMD,
                quote_path(&self.trimmed_output_file),
                quote_path(&self.assembly_output_dir)
            )],
            //bakta refuses an existing outdir unless forced, and we create it up front
            Stage::AnnotateGenome => vec![format!(
                "{} --outdir {} --prefix {} --force {}",
                Self::BAKTA_CMD,
                quote_path(&self.annotation_output_dir),
                Self::BAKTA_PREFIX,
                quote_path(&self.sorted_bam_output_file)
            )],
        }
    }

    /// Run a single stage. Stops at the first failing command
    pub fn run_stage<R: CommandRunner>(&self, stage: Stage, runner: &mut R) -> Result<()> {
        println!("{}", stage.start_message());
        for cmd in self.stage_commands(stage) {
            runner
                .run(&cmd)
                .with_context(|| format!("{} stage failed", stage))?;
        }
        println!("{}", stage.done_message());
        Ok(())
    }

    pub fn quality_control<R: CommandRunner>(&self, runner: &mut R) -> Result<()> {
        self.run_stage(Stage::QualityControl, runner)
    }

    pub fn trim_reads<R: CommandRunner>(&self, runner: &mut R) -> Result<()> {
        self.run_stage(Stage::TrimReads, runner)
    }

    pub fn align_reads<R: CommandRunner>(&self, runner: &mut R) -> Result<()> {
        self.run_stage(Stage::AlignReads, runner)
    }

    pub fn convert_to_bam<R: CommandRunner>(&self, runner: &mut R) -> Result<()> {
        self.run_stage(Stage::ConvertToBam, runner)
    }

    pub fn sort_bam<R: CommandRunner>(&self, runner: &mut R) -> Result<()> {
        self.run_stage(Stage::SortBam, runner)
    }

    pub fn assemble_genome<R: CommandRunner>(&self, runner: &mut R) -> Result<()> {
        self.run_stage(Stage::AssembleGenome, runner)
    }

    pub fn annotate_genome<R: CommandRunner>(&self, runner: &mut R) -> Result<()> {
        self.run_stage(Stage::AnnotateGenome, runner)
    }

    /// Run all stages in order. The first failure aborts the rest
    pub fn run_pipeline<R: CommandRunner>(&self, runner: &mut R) -> Result<()> {
        let missing = check_tools(&Self::REQUIRED_TOOLS);
        if !missing.is_empty() {
            log::warn!("Missing tools: {}. The stage using them will fail", missing.join(", "));
        }

        self.quality_control(runner)?;
        self.trim_reads(runner)?;
        self.align_reads(runner)?;
        self.convert_to_bam(runner)?;
        self.sort_bam(runner)?;
        self.assemble_genome(runner)?;
        self.annotate_genome(runner)?;

        println!("{}", MSG_PIPELINE_COMPLETE);
        Ok(())
    }
}
